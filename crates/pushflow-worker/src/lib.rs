//! PushFlow background worker.
//!
//! Runs in the service-worker context: turns push payloads into displayed
//! notifications and reports click/close/show events to the delivery
//! tracking endpoint. The host runtime forwards its lifecycle events to
//! [`ServiceWorker::dispatch`] and provides display primitives through
//! [`WorkerHost`].

pub mod config;
pub mod delivery;
pub mod display;
pub mod events;
mod handlers;
pub mod host;
pub mod registry;
pub mod worker;

pub use config::WorkerConfig;
pub use delivery::DeliveryTracker;
pub use events::{NotificationEvent, PushMessage, ShownNotification, WorkerEvent, WorkerEventKind};
pub use host::WorkerHost;
pub use pushflow_types::HostError;
pub use registry::{EventHandler, EventRegistry};
pub use worker::{ServiceWorker, WorkerContext};

/// Unified error type for the pushflow-worker crate.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid worker origin: {0}")]
    InvalidOrigin(String),

    #[error("Unknown worker event: {0}")]
    UnknownEvent(String),
}
