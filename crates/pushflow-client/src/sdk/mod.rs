//! The PushFlow SDK instance and its opt-in workflow.
//!
//! Flow: `init` registers the background worker and, when permission was
//! granted earlier, subscribes straight away. `request_permission` prompts
//! and subscribes on grant. `subscribe_user` reuses any existing browser
//! subscription and otherwise creates one and registers it with the backend.


use chrono::Utc;
use serde_json::{Map, Value};

use pushflow_types::{
    Device, NotificationPayload, PushSubscription, Registration, SubscribeOptions, User,
    decode_server_key,
};

use crate::api::{BackendClient, RegisterUserRequest};
use crate::config::PushFlowConfig;
use crate::identity;
use crate::platform::{PermissionStatus, PushPlatform, WorkerRegistration};
use crate::{
    APPLICATION_SERVER_KEY, PushFlowError, SERVICE_WORKER_PATH, SERVICE_WORKER_SCOPE,
};

/// Informational log line, emitted only when the config's debug flag is set.
macro_rules! debug_log {
    ($sdk:expr, $($arg:tt)+) => {
        if $sdk.config.debug() {
            tracing::info!($($arg)+);
        }
    };
}

/// A single SDK instance. Owns all cached state for one page.
pub struct PushFlow {
    config: PushFlowConfig,
    platform: Box<dyn PushPlatform>,
    api: BackendClient,
    supported: bool,
    initialized: bool,
    subscription: Option<PushSubscription>,
    user: Option<User>,
    device: Option<Device>,
}

impl PushFlow {
    pub fn new(config: PushFlowConfig, platform: impl PushPlatform + 'static) -> Self {
        let api = BackendClient::new(config.api_url());
        Self::with_backend(config, platform, api)
    }

    /// Build an instance around an existing backend client.
    pub fn with_backend(
        config: PushFlowConfig,
        platform: impl PushPlatform + 'static,
        api: BackendClient,
    ) -> Self {
        let supported = platform.supports_push();
        let sdk = Self {
            config,
            platform: Box::new(platform),
            api,
            supported,
            initialized: false,
            subscription: None,
            user: None,
            device: None,
        };
        debug_log!(sdk, subscriber_id = sdk.config.subscriber_id(), "PushFlow SDK initialized");
        sdk
    }

    /// Whether the host exposes service workers and the push manager.
    pub fn is_supported(platform: &dyn PushPlatform) -> bool {
        platform.supports_push()
    }

    /// Current permission, or `Unsupported` when push is unavailable.
    pub fn permission_status(platform: &dyn PushPlatform) -> PermissionStatus {
        if !Self::is_supported(platform) {
            return PermissionStatus::Unsupported;
        }
        platform.permission()
    }

    pub fn config(&self) -> &PushFlowConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn device(&self) -> Option<&Device> {
        self.device.as_ref()
    }

    pub fn subscription(&self) -> Option<&PushSubscription> {
        self.subscription.as_ref()
    }

    /// Cached registration, if the backend has registered this user.
    pub fn registration(&self) -> Option<Registration> {
        self.user.as_ref().map(|user| Registration {
            user: user.clone(),
            device: self.device.clone(),
        })
    }

    /// Register the worker and subscribe if permission was already granted.
    ///
    /// Never prompts. Returns `false` on a repeated call, on unsupported
    /// hosts, and on any failure along the way.
    pub async fn init(&mut self) -> bool {
        if self.initialized {
            debug_log!(self, "PushFlow already initialized, skipping");
            return false;
        }
        self.initialized = true;

        if !self.supported {
            self.report(
                "Push notifications are not supported in this browser",
                &PushFlowError::Unsupported,
            );
            return false;
        }

        match self.start().await {
            Ok(()) => true,
            Err(e) => {
                self.report("Failed to initialize PushFlow", &e);
                false
            }
        }
    }

    async fn start(&mut self) -> Result<(), PushFlowError> {
        self.register_service_worker().await?;

        match self.platform.permission() {
            PermissionStatus::Granted => {
                self.subscribe_user().await?;
            }
            PermissionStatus::Default => {
                debug_log!(self, "Push notification permission not yet requested");
            }
            PermissionStatus::Denied | PermissionStatus::Unsupported => {
                debug_log!(self, "Push notification permission denied");
                self.config.callbacks().permission_denied();
            }
        }
        Ok(())
    }

    async fn register_service_worker(&self) -> Result<WorkerRegistration, PushFlowError> {
        let result = self.find_or_register_worker().await;
        if let Err(e) = &result {
            self.report("Service worker registration failed", e);
        }
        result
    }

    async fn find_or_register_worker(&self) -> Result<WorkerRegistration, PushFlowError> {
        if let Some(existing) = self
            .platform
            .service_worker_registration(SERVICE_WORKER_PATH)
            .await?
        {
            debug_log!(self, scope = %existing.scope, "Service worker already registered");
            return Ok(existing);
        }

        let registration = self
            .platform
            .register_service_worker(SERVICE_WORKER_PATH, SERVICE_WORKER_SCOPE)
            .await?;
        debug_log!(self, scope = %registration.scope, "Service worker registered successfully");
        Ok(registration)
    }

    /// Show the native permission prompt and subscribe on grant.
    pub async fn request_permission(&mut self) -> bool {
        if !self.supported {
            self.report(
                "Push notifications are not supported",
                &PushFlowError::Unsupported,
            );
            return false;
        }

        let permission = match self.platform.request_permission().await {
            Ok(permission) => permission,
            Err(e) => {
                self.report("Failed to request permission", &e.into());
                return false;
            }
        };

        if permission != PermissionStatus::Granted {
            debug_log!(self, ?permission, "Push notification permission denied");
            self.config.callbacks().permission_denied();
            return false;
        }

        debug_log!(self, "Push notification permission granted");
        self.config.callbacks().permission_granted();
        match self.subscribe_user().await {
            Ok(_) => true,
            Err(e) => {
                self.report("Failed to request permission", &e);
                false
            }
        }
    }

    /// Ensure a push subscription exists and is registered with the backend.
    ///
    /// An existing browser subscription is treated as authoritative: it is
    /// cached and the current registration (if any) returned without a new
    /// subscribe call. Backend failures propagate.
    pub async fn subscribe_user(&mut self) -> Result<Option<Registration>, PushFlowError> {
        match self.try_subscribe().await {
            Ok(registration) => Ok(registration),
            Err(e) => {
                self.report("Failed to subscribe user", &e);
                Err(e)
            }
        }
    }

    async fn try_subscribe(&mut self) -> Result<Option<Registration>, PushFlowError> {
        if let Some(existing) = self.platform.existing_subscription().await? {
            debug_log!(self, endpoint = %existing.endpoint, "Push subscription already exists");
            self.subscription = Some(existing);
            return Ok(self.registration());
        }

        let application_server_key = decode_server_key(APPLICATION_SERVER_KEY)
            .map_err(|e| PushFlowError::InvalidServerKey(e.to_string()))?;
        let subscription = self
            .platform
            .subscribe(&SubscribeOptions {
                user_visible_only: true,
                application_server_key,
            })
            .await?;

        let request = self.registration_request(&subscription)?;
        let registration = self.api.register_user(&request).await?;

        self.user = Some(registration.user.clone());
        self.device = registration.device.clone();
        self.subscription = Some(subscription);
        debug_log!(
            self,
            user_id = %registration.user.id,
            "User subscribed successfully"
        );

        self.config.callbacks().user_registered(&registration);
        Ok(Some(registration))
    }

    fn registration_request(
        &self,
        subscription: &PushSubscription,
    ) -> Result<RegisterUserRequest, PushFlowError> {
        let fields = self.platform.form_fields();
        let env = self.platform.environment();
        let stamp = Utc::now().timestamp_millis();

        Ok(RegisterUserRequest {
            email: identity::harvest_email(&fields)
                .unwrap_or_else(|| format!("anonymous-{stamp}@example.com")),
            name: identity::harvest_name(&fields).unwrap_or_else(|| format!("anonymous-{stamp}")),
            subscriber_id: self.config.subscriber_id().to_string(),
            device_token: serde_json::to_string(subscription)?,
            platform: self.config.platform().to_string(),
            user_agent: env.user_agent,
            language: env.language,
            timezone: env.timezone,
        })
    }

    /// Send preference changes for the registered user.
    ///
    /// Returns the backend response, or `None` when no user is registered
    /// (no request is made) or the update fails.
    pub async fn update_preferences(&mut self, preferences: Map<String, Value>) -> Option<Value> {
        let Some(user_id) = self.user.as_ref().map(|u| u.id.clone()) else {
            self.report("No user registered", &PushFlowError::NotRegistered);
            return None;
        };

        match self.api.update_preferences(&user_id, &preferences).await {
            Ok(data) => {
                if let Some(user) = self.user.as_mut() {
                    user.merge(&preferences);
                }
                debug_log!(self, user_id = %user_id, "User preferences updated");
                Some(data)
            }
            Err(e) => {
                self.report("Failed to update preferences", &e);
                None
            }
        }
    }

    /// Drop the browser subscription and mark the user opted out.
    ///
    /// Without a registered user the browser subscription is still released,
    /// but the call is reported as an error and returns `false`.
    pub async fn unsubscribe(&mut self) -> bool {
        if let Some(subscription) = self.subscription.take() {
            if let Err(e) = self.platform.unsubscribe(&subscription).await {
                self.subscription = Some(subscription);
                self.report("Failed to unsubscribe", &e.into());
                return false;
            }
        }

        if self.user.is_none() {
            self.report("Cannot opt out", &PushFlowError::NotRegistered);
            return false;
        }

        let mut opt_out = Map::new();
        opt_out.insert("optIn".into(), Value::Bool(false));
        // A failed opt-out is already reported and does not undo the unsubscribe.
        self.update_preferences(opt_out).await;

        debug_log!(self, "User unsubscribed successfully");
        true
    }

    /// Handle a push payload relayed to the page by the worker.
    ///
    /// Invokes `on_notification_received`; malformed input is reported and
    /// ignored.
    pub fn handle_foreground_message(&self, raw: &str) -> Option<NotificationPayload> {
        match serde_json::from_str::<NotificationPayload>(raw) {
            Ok(payload) => {
                debug_log!(self, id = ?payload.id, "Notification received in page");
                self.config.callbacks().notification_received(&payload);
                Some(payload)
            }
            Err(e) => {
                self.report("Failed to parse relayed notification", &e.into());
                None
            }
        }
    }

    /// The one error path: every failure the SDK swallows or returns goes
    /// through here.
    fn report(&self, context: &str, error: &PushFlowError) {
        tracing::error!(error = %error, "[PushFlow Error] {context}");
    }
}
