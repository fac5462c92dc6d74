use serde::Serialize;
use url::Url;

use super::*;
use crate::PushFlowError;

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    /// Use a caller-supplied `reqwest::Client` (shared pool, custom TLS, ...).
    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    pub(super) fn endpoint(&self, segments: &[&str]) -> Result<Url, PushFlowError> {
        let mut url = Url::parse(&self.base_url)?;
        let invalid = || PushFlowError::InvalidConfig(format!("not a base URL: {}", self.base_url));
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Execute a POST request with a JSON body.
    pub(super) async fn post_json(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<String, PushFlowError> {
        let resp = self.http.post(url.as_str()).json(body).send().await?;

        let status = resp.status();
        let resp_body = resp.text().await?;

        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "Backend rejected request");
            return Err(PushFlowError::Api {
                status: status.as_u16(),
                message: resp_body,
            });
        }

        Ok(resp_body)
    }

    /// Execute a PUT request with a JSON body.
    pub(super) async fn put_json(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<String, PushFlowError> {
        let resp = self.http.put(url.as_str()).json(body).send().await?;

        let status = resp.status();
        let resp_body = resp.text().await?;

        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "Backend rejected request");
            return Err(PushFlowError::Api {
                status: status.as_u16(),
                message: resp_body,
            });
        }

        Ok(resp_body)
    }
}
