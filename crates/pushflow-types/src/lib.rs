//! Data model shared by the PushFlow page SDK and its background worker.
//!
//! Covers the browser push subscription, backend user/device records,
//! server-pushed notification payloads and the display options derived
//! from them, plus delivery status reports.

pub mod payload;
pub mod records;
pub mod subscription;

pub use payload::{
    DeliveryReport, DeliveryStatus, NotificationAction, NotificationData, NotificationOptions,
    NotificationPayload, Priority,
};
pub use records::{Device, RecordId, Registration, User};
pub use subscription::{PushSubscription, SubscribeOptions, SubscriptionKeys, decode_server_key};

/// Failure reported by the host runtime (browser page or service worker).
///
/// Hosts translate their native exceptions into this type so callers never
/// see platform-specific error values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct HostError(pub String);

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub(crate) mod serde_ext {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    impl From<TextOrNumber> for String {
        fn from(raw: TextOrNumber) -> Self {
            match raw {
                TextOrNumber::Text(s) => s,
                TextOrNumber::Number(n) => n.to_string(),
            }
        }
    }

    /// Accept `"abc"`, `42` or `null` and normalise to `Option<String>`.
    pub fn opt_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<TextOrNumber>::deserialize(deserializer)?.map(String::from))
    }

    pub fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(TextOrNumber::deserialize(deserializer)?.into())
    }

    /// Like [`opt_text_or_number`], but `null` or an absent field reads as `""`.
    pub fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(opt_text_or_number(deserializer)?.unwrap_or_default())
    }

    /// Decode any JSON value as `T`, treating a value of the wrong shape as absent.
    pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => None,
            value => serde_json::from_value(value).ok(),
        })
    }
}
