//! Display primitives provided by the service-worker runtime.

use async_trait::async_trait;

use pushflow_types::{HostError, NotificationOptions};

use crate::events::ShownNotification;

/// What the worker needs from its host: `registration.showNotification`,
/// `notification.close` and `clients.openWindow`.
#[async_trait(?Send)]
pub trait WorkerHost {
    /// Display a notification; resolves once the host has shown it.
    async fn show_notification(
        &self,
        title: &str,
        options: &NotificationOptions,
    ) -> Result<(), HostError>;

    fn close_notification(&self, notification: &ShownNotification);

    async fn open_window(&self, url: &str) -> Result<(), HostError>;
}
