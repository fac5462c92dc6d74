//! PushFlow page SDK.
//!
//! Drives the opt-in flow for browser push notifications: service worker
//! registration, permission prompt, push subscription, and registration of
//! the user/device with the PushFlow backend. Browser capabilities are
//! reached through the [`PushPlatform`] trait so the workflow itself is
//! host-independent.

pub mod api;
pub mod config;
pub mod identity;
pub mod logging;
pub mod platform;
pub mod sdk;

pub use api::BackendClient;
pub use config::{Callbacks, PushFlowConfig, PushFlowConfigBuilder};
pub use platform::{
    DeviceEnvironment, FormField, PermissionStatus, PushPlatform, WorkerRegistration,
};
pub use pushflow_types::{
    Device, HostError, NotificationPayload, PushSubscription, Registration, User,
};
pub use sdk::PushFlow;

/// Script URL of the background worker.
pub const SERVICE_WORKER_PATH: &str = "/pushify-ir-sw.js";

/// Scope the background worker is registered under.
pub const SERVICE_WORKER_SCOPE: &str = "/";

/// Application server public key used to create push subscriptions.
pub const APPLICATION_SERVER_KEY: &str =
    "BCTrlArvyrzg3Me6lCLc6Zo6ymgCo4p3j3IGMoumsxmO5C7x6m4BDluZNl7cejeCspvbruBDC3FSK-C73m4reB8";

/// Platform tag used when the configuration does not name one.
pub const DEFAULT_PLATFORM: &str = "WEB";

/// Unified error type for the pushflow-client crate.
#[derive(Debug, thiserror::Error)]
pub enum PushFlowError {
    #[error("Push notifications are not supported in this environment")]
    Unsupported,

    #[error("No user registered")]
    NotRegistered,

    #[error("Host platform error: {0}")]
    Platform(#[from] HostError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Backend error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid application server key: {0}")]
    InvalidServerKey(String),
}
