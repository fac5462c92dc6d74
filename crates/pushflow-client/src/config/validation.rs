//! Configuration value validation.

use url::Url;

use crate::PushFlowError;

/// Subscriber ids identify the tenant on the backend and must be present.
pub fn validate_subscriber_id(value: &str) -> Result<(), PushFlowError> {
    if value.trim().is_empty() {
        return Err(PushFlowError::InvalidConfig(
            "subscriber id must not be empty".into(),
        ));
    }
    Ok(())
}

/// Check that the backend URL is an absolute http(s) URL and strip any
/// trailing slash so endpoint paths can be appended directly.
pub fn normalize_api_url(value: &str) -> Result<String, PushFlowError> {
    let trimmed = value.trim();
    let url = Url::parse(trimmed)?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(PushFlowError::InvalidConfig(format!(
            "api url must use http or https, got '{}'",
            url.scheme()
        )));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
