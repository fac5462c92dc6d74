//! Turning push payloads into notification display options.

use pushflow_types::{NotificationData, NotificationOptions, NotificationPayload};

use crate::config::WorkerConfig;

pub const VIBRATE_PATTERN: [u32; 3] = [100, 50, 100];

const TAG_PREFIX: &str = "pushflow-";

/// De-duplication tag: the payload id, or the current time when absent.
pub fn notification_tag(id: Option<&str>, now_millis: i64) -> String {
    match id.filter(|id| !id.is_empty()) {
        Some(id) => format!("{TAG_PREFIX}{id}"),
        None => format!("{TAG_PREFIX}{now_millis}"),
    }
}

/// Build display options for a payload. `HIGH` priority re-alerts and
/// stays on screen until the user interacts.
pub fn build_options(
    payload: &NotificationPayload,
    config: &WorkerConfig,
    now_millis: i64,
) -> NotificationOptions {
    let high = payload.is_high_priority();
    let icon = payload
        .icon_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .unwrap_or(config.default_icon());

    NotificationOptions {
        body: payload.body.clone(),
        icon: icon.to_string(),
        image: payload.image_url.clone(),
        badge: config.badge().to_string(),
        vibrate: VIBRATE_PATTERN.to_vec(),
        data: NotificationData {
            url: payload.click_url.clone(),
            notification_id: payload.id.clone(),
            delivery_id: payload.delivery_id.clone(),
        },
        actions: payload.actions.clone().unwrap_or_default(),
        tag: notification_tag(payload.id.as_deref(), now_millis),
        renotify: high,
        require_interaction: high,
    }
}
