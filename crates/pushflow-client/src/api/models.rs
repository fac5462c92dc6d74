//! Request bodies for the public user endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /public/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub email: String,
    pub name: String,
    pub subscriber_id: String,
    /// The push subscription serialized as a JSON string.
    pub device_token: String,
    pub platform: String,
    pub user_agent: String,
    pub language: String,
    pub timezone: String,
}
