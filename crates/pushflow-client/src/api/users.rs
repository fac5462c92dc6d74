use pushflow_types::{RecordId, Registration};
use serde_json::{Map, Value};

use super::*;
use crate::PushFlowError;

impl BackendClient {
    /// Register a user/device pair. Returns the backend's `{user, device}`.
    pub async fn register_user(
        &self,
        request: &RegisterUserRequest,
    ) -> Result<Registration, PushFlowError> {
        let url = self.endpoint(&["public", "users"])?;
        let body = self.post_json(url, request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Replace preference keys on a registered user.
    ///
    /// An empty response body is returned as `Value::Null`.
    pub async fn update_preferences(
        &self,
        user_id: &RecordId,
        preferences: &Map<String, Value>,
    ) -> Result<Value, PushFlowError> {
        let url = self.endpoint(&["public", "users", user_id.as_str(), "preferences"])?;
        let body = self.put_json(url, preferences).await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}
