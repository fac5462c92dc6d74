//! SDK configuration: builder, environment loading and validation.

pub mod validation;

use std::fmt;
use std::rc::Rc;

use pushflow_types::{NotificationPayload, Registration};

use crate::{DEFAULT_PLATFORM, PushFlowError};

type Hook = Rc<dyn Fn()>;
type RegistrationHook = Rc<dyn Fn(&Registration)>;
type NotificationHook = Rc<dyn Fn(&NotificationPayload)>;

/// Optional hooks invoked at points of the opt-in flow.
#[derive(Clone, Default)]
pub struct Callbacks {
    on_permission_granted: Option<Hook>,
    on_permission_denied: Option<Hook>,
    on_user_registered: Option<RegistrationHook>,
    on_notification_received: Option<NotificationHook>,
}

impl Callbacks {
    pub(crate) fn permission_granted(&self) {
        if let Some(hook) = &self.on_permission_granted {
            hook();
        }
    }

    pub(crate) fn permission_denied(&self) {
        if let Some(hook) = &self.on_permission_denied {
            hook();
        }
    }

    pub(crate) fn user_registered(&self, registration: &Registration) {
        if let Some(hook) = &self.on_user_registered {
            hook(registration);
        }
    }

    pub(crate) fn notification_received(&self, payload: &NotificationPayload) {
        if let Some(hook) = &self.on_notification_received {
            hook(payload);
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_permission_granted", &self.on_permission_granted.is_some())
            .field("on_permission_denied", &self.on_permission_denied.is_some())
            .field("on_user_registered", &self.on_user_registered.is_some())
            .field(
                "on_notification_received",
                &self.on_notification_received.is_some(),
            )
            .finish()
    }
}

/// Immutable SDK configuration.
#[derive(Debug, Clone)]
pub struct PushFlowConfig {
    subscriber_id: String,
    api_url: String,
    debug: bool,
    platform: String,
    callbacks: Callbacks,
}

impl PushFlowConfig {
    /// Start building a configuration for the given subscriber and backend.
    pub fn builder(
        subscriber_id: impl Into<String>,
        api_url: impl Into<String>,
    ) -> PushFlowConfigBuilder {
        PushFlowConfigBuilder {
            subscriber_id: subscriber_id.into(),
            api_url: api_url.into(),
            debug: false,
            platform: None,
            callbacks: Callbacks::default(),
        }
    }

    /// Load configuration from `PUSHFLOW_*` environment variables.
    pub fn from_env() -> Result<Self, PushFlowError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Keys: `PUSHFLOW_SUBSCRIBER_ID`, `PUSHFLOW_API_URL` (required),
    /// `PUSHFLOW_DEBUG` (`"true"`), `PUSHFLOW_PLATFORM`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PushFlowError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let g = |key: &str| lookup(key).unwrap_or_default();

        let mut builder = Self::builder(g("PUSHFLOW_SUBSCRIBER_ID"), g("PUSHFLOW_API_URL"))
            .debug(g("PUSHFLOW_DEBUG").eq_ignore_ascii_case("true"));
        if let Some(platform) = lookup("PUSHFLOW_PLATFORM") {
            builder = builder.platform(platform);
        }
        builder.build()
    }

    pub fn subscriber_id(&self) -> &str {
        &self.subscriber_id
    }

    /// Backend base URL, without a trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn callbacks(&self) -> &Callbacks {
        &self.callbacks
    }
}

/// Builder for [`PushFlowConfig`].
pub struct PushFlowConfigBuilder {
    subscriber_id: String,
    api_url: String,
    debug: bool,
    platform: Option<String>,
    callbacks: Callbacks,
}

impl PushFlowConfigBuilder {
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Platform tag sent with registrations. Blank values fall back to `WEB`.
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn on_permission_granted(mut self, hook: impl Fn() + 'static) -> Self {
        self.callbacks.on_permission_granted = Some(Rc::new(hook));
        self
    }

    pub fn on_permission_denied(mut self, hook: impl Fn() + 'static) -> Self {
        self.callbacks.on_permission_denied = Some(Rc::new(hook));
        self
    }

    pub fn on_user_registered(
        mut self,
        hook: impl Fn(&Registration) + 'static,
    ) -> Self {
        self.callbacks.on_user_registered = Some(Rc::new(hook));
        self
    }

    pub fn on_notification_received(
        mut self,
        hook: impl Fn(&NotificationPayload) + 'static,
    ) -> Self {
        self.callbacks.on_notification_received = Some(Rc::new(hook));
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> Result<PushFlowConfig, PushFlowError> {
        let platform = self
            .platform
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PLATFORM.to_string());

        validation::validate_subscriber_id(&self.subscriber_id)?;
        let api_url = validation::normalize_api_url(&self.api_url)?;

        Ok(PushFlowConfig {
            subscriber_id: self.subscriber_id,
            api_url,
            debug: self.debug,
            platform,
            callbacks: self.callbacks,
        })
    }
}
