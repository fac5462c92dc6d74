//! Worker configuration.

use url::Url;

use crate::WorkerError;

/// Icon shown when a payload carries no `iconUrl`.
pub const DEFAULT_ICON: &str = "/default-icon.png";
/// Badge shown on every notification.
pub const DEFAULT_BADGE: &str = "/badge-icon.png";

/// Settings for one worker instance.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    origin: Url,
    default_icon: String,
    badge: String,
}

impl WorkerConfig {
    /// `origin` is the site the worker is served from; delivery reports go
    /// to `{origin}/api/deliveries/...`.
    pub fn new(origin: &str) -> Result<Self, WorkerError> {
        let origin = Url::parse(origin.trim())?;
        if origin.scheme() != "http" && origin.scheme() != "https" {
            return Err(WorkerError::InvalidOrigin(origin.to_string()));
        }
        Ok(Self {
            origin,
            default_icon: DEFAULT_ICON.into(),
            badge: DEFAULT_BADGE.into(),
        })
    }

    pub fn with_default_icon(mut self, icon: impl Into<String>) -> Self {
        self.default_icon = icon.into();
        self
    }

    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = badge.into();
        self
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn default_icon(&self) -> &str {
        &self.default_icon
    }

    pub fn badge(&self) -> &str {
        &self.badge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_asset_paths() {
        let config = WorkerConfig::new("https://shop.example.com").unwrap();
        assert_eq!(config.default_icon(), "/default-icon.png");
        assert_eq!(config.badge(), "/badge-icon.png");

        let custom = config.with_badge("/b.png").with_default_icon("/i.png");
        assert_eq!(custom.badge(), "/b.png");
        assert_eq!(custom.default_icon(), "/i.png");
    }

    #[test]
    fn rejects_non_http_origin() {
        assert!(matches!(
            WorkerConfig::new("mailto:ops@example.com"),
            Err(WorkerError::InvalidOrigin(_))
        ));
        assert!(matches!(
            WorkerConfig::new("relative/path"),
            Err(WorkerError::Url(_))
        ));
    }
}
