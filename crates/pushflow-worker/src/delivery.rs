//! Delivery status reporting.
//!
//! Reports are fire-and-forget: failures are logged, never retried and
//! never surfaced to the event handler.

use chrono::{SecondsFormat, Utc};
use url::Url;

use pushflow_types::{DeliveryReport, DeliveryStatus};

use crate::WorkerError;

/// Posts delivery lifecycle events to `{origin}/api/deliveries/{id}/status`.
#[derive(Debug, Clone)]
pub struct DeliveryTracker {
    http: reqwest::Client,
    origin: Url,
}

impl DeliveryTracker {
    pub fn new(http: reqwest::Client, origin: Url) -> Self {
        Self { http, origin }
    }

    /// Status endpoint for one delivery. The id is percent-encoded as a
    /// single path segment.
    pub fn status_url(&self, delivery_id: &str) -> Result<Url, WorkerError> {
        let mut url = self.origin.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| WorkerError::InvalidOrigin(self.origin.to_string()))?
            .clear()
            .extend(["api", "deliveries", delivery_id, "status"]);
        Ok(url)
    }

    /// Send one report. Returns the HTTP status and response body.
    pub async fn send(
        &self,
        delivery_id: &str,
        status: DeliveryStatus,
    ) -> Result<(u16, String), WorkerError> {
        let url = self.status_url(delivery_id)?;
        let report = DeliveryReport {
            status,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        let resp = self.http.post(url).json(&report).send().await?;
        let code = resp.status().as_u16();
        let body = resp.text().await?;
        Ok((code, body))
    }

    /// Send one report and log the outcome.
    pub async fn track(&self, delivery_id: &str, status: DeliveryStatus) {
        match self.send(delivery_id, status).await {
            Ok((code, body)) => {
                tracing::info!(
                    delivery_id,
                    status = status.as_str(),
                    response_status = code,
                    response_body = %body,
                    "Track delivery response"
                );
            }
            Err(e) => {
                tracing::error!(
                    delivery_id,
                    status = status.as_str(),
                    error = %e,
                    "Failed to track delivery event"
                );
            }
        }
    }
}
