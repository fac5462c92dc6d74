//! Server-pushed notification payloads and delivery reports.

use serde::{Deserialize, Serialize};

use crate::serde_ext::{lenient, opt_text_or_number, text_or_empty};

/// Delivery priority attached to a push payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Normal,
    High,
    #[serde(other)]
    Other,
}

/// Action button offered on a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// JSON body of a push message, as sent by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub delivery_id: Option<String>,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub body: String,
    #[serde(default, deserialize_with = "lenient")]
    pub icon_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub click_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub priority: Option<Priority>,
    /// A malformed list is dropped rather than failing the whole payload.
    #[serde(default, deserialize_with = "lenient")]
    pub actions: Option<Vec<NotificationAction>>,
}

impl NotificationPayload {
    pub fn is_high_priority(&self) -> bool {
        self.priority == Some(Priority::High)
    }
}

/// Data attached to a displayed notification and handed back on click/close.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub notification_id: Option<String>,
    #[serde(default)]
    pub delivery_id: Option<String>,
}

/// Display options handed to the host's `showNotification`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOptions {
    pub body: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub badge: String,
    pub vibrate: Vec<u32>,
    pub data: NotificationData,
    pub actions: Vec<NotificationAction>,
    pub tag: String,
    pub renotify: bool,
    pub require_interaction: bool,
}

/// Lifecycle status reported for a single delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Clicked,
    Delivered,
}

impl DeliveryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clicked => "CLICKED",
            Self::Delivered => "DELIVERED",
        }
    }
}

/// Body of `POST /api/deliveries/{deliveryId}/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub status: DeliveryStatus,
    /// RFC 3339 timestamp in UTC.
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_parses_full_message() {
        let body = r#"{
            "id": "n1",
            "deliveryId": 77,
            "title": "Hi",
            "body": "there",
            "iconUrl": "https://cdn.example.com/i.png",
            "clickUrl": "https://example.com/landing",
            "priority": "HIGH",
            "actions": [{ "action": "open", "title": "Open" }]
        }"#;
        let payload: NotificationPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.id.as_deref(), Some("n1"));
        assert_eq!(payload.delivery_id.as_deref(), Some("77"));
        assert!(payload.is_high_priority());
        assert_eq!(payload.actions.unwrap()[0].action, "open");
    }

    #[test]
    fn payload_tolerates_missing_and_unknown_fields() {
        let payload: NotificationPayload =
            serde_json::from_str(r#"{"title":"x","priority":"URGENT","extra":1,"id":null}"#)
                .unwrap();
        assert_eq!(payload.priority, Some(Priority::Other));
        assert!(!payload.is_high_priority());
        assert!(payload.id.is_none());
        assert!(payload.delivery_id.is_none());
        assert!(payload.body.is_empty());
    }

    #[test]
    fn payload_tolerates_null_and_mistyped_fields() {
        let body = r#"{
            "id": 5,
            "title": "Hi",
            "body": null,
            "iconUrl": null,
            "clickUrl": 12,
            "priority": 1,
            "actions": "open"
        }"#;
        let payload: NotificationPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.id.as_deref(), Some("5"));
        assert_eq!(payload.title, "Hi");
        assert_eq!(payload.body, "");
        assert!(payload.icon_url.is_none());
        assert!(payload.click_url.is_none());
        assert!(payload.priority.is_none());
        assert!(!payload.is_high_priority());
        assert!(payload.actions.is_none());
    }

    #[test]
    fn delivery_report_wire_shape() {
        let report = DeliveryReport {
            status: DeliveryStatus::Clicked,
            timestamp: "2026-01-01T00:00:00.000Z".into(),
        };
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({ "status": "CLICKED", "timestamp": "2026-01-01T00:00:00.000Z" })
        );
        assert_eq!(DeliveryStatus::Delivered.as_str(), "DELIVERED");
    }

    #[test]
    fn options_serialize_camel_case() {
        let options = NotificationOptions {
            body: "b".into(),
            icon: "/default-icon.png".into(),
            image: None,
            badge: "/badge-icon.png".into(),
            vibrate: vec![100, 50, 100],
            data: NotificationData::default(),
            actions: vec![],
            tag: "pushflow-1".into(),
            renotify: false,
            require_interaction: true,
        };
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["requireInteraction"], serde_json::Value::Bool(true));
        assert!(value.get("image").is_none());
    }
}
