//! Browser push subscription and the application server key.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

/// Encryption keys issued by the browser alongside the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    /// P-256 ECDH public key (base64url).
    pub p256dh: String,
    /// Shared auth secret (base64url).
    pub auth: String,
}

/// A browser push subscription.
///
/// Serializes to the same shape as the browser's `PushSubscription.toJSON()`,
/// which is what the backend stores as the device token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushSubscription {
    pub endpoint: String,
    #[serde(default)]
    pub expiration_time: Option<i64>,
    pub keys: SubscriptionKeys,
}

/// Options passed to the push manager when creating a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribeOptions {
    pub user_visible_only: bool,
    /// Raw (decoded) application server public key.
    pub application_server_key: Vec<u8>,
}

/// Decode a base64url application server key into raw bytes.
///
/// Trailing `=` padding is optional.
pub fn decode_server_key(key: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(key.trim().trim_end_matches('='))
}
