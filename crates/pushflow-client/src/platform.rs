//! Host capabilities consumed by the SDK.
//!
//! A browser host implements [`PushPlatform`] over the Service Worker,
//! Push and Notification APIs; tests use in-memory fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use pushflow_types::{HostError, PushSubscription, SubscribeOptions};

/// Notification permission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// Not yet requested.
    Default,
    /// The environment has no push support at all.
    Unsupported,
}

/// A registered background worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerRegistration {
    pub script_url: String,
    pub scope: String,
}

/// A visible `<input>` element on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormField {
    /// The `type` attribute (`"email"`, `"text"`, ...).
    pub input_type: String,
    pub name: String,
    pub id: String,
    pub value: String,
}

impl FormField {
    pub fn new(input_type: &str, name: &str, id: &str, value: &str) -> Self {
        Self {
            input_type: input_type.into(),
            name: name.into(),
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Navigator details sent along with a registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceEnvironment {
    pub user_agent: String,
    pub language: String,
    pub timezone: String,
}

/// Browser push primitives as seen from the page.
#[async_trait(?Send)]
pub trait PushPlatform {
    /// Whether both service workers and the push manager are available.
    fn supports_push(&self) -> bool;

    /// Current notification permission, without prompting.
    fn permission(&self) -> PermissionStatus;

    /// Show the native permission prompt.
    async fn request_permission(&self) -> Result<PermissionStatus, HostError>;

    async fn service_worker_registration(
        &self,
        script_url: &str,
    ) -> Result<Option<WorkerRegistration>, HostError>;

    async fn register_service_worker(
        &self,
        script_url: &str,
        scope: &str,
    ) -> Result<WorkerRegistration, HostError>;

    /// Subscription currently held by the push manager, once the worker is ready.
    async fn existing_subscription(&self) -> Result<Option<PushSubscription>, HostError>;

    async fn subscribe(&self, options: &SubscribeOptions) -> Result<PushSubscription, HostError>;

    async fn unsubscribe(&self, subscription: &PushSubscription) -> Result<bool, HostError>;

    /// Inputs currently present on the page, in document order.
    fn form_fields(&self) -> Vec<FormField>;

    fn environment(&self) -> DeviceEnvironment;
}
