//! Service-worker lifecycle events handled by PushFlow.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use pushflow_types::NotificationData;

use crate::WorkerError;

/// Event kinds the registry is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerEventKind {
    Push,
    NotificationClick,
    NotificationClose,
    NotificationShow,
}

impl WorkerEventKind {
    pub const ALL: [Self; 4] = [
        Self::Push,
        Self::NotificationClick,
        Self::NotificationClose,
        Self::NotificationShow,
    ];

    /// DOM event name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::NotificationClick => "notificationclick",
            Self::NotificationClose => "notificationclose",
            Self::NotificationShow => "notificationshow",
        }
    }
}

impl fmt::Display for WorkerEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkerEventKind {
    type Err = WorkerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| WorkerError::UnknownEvent(s.to_string()))
    }
}

/// Data carried by a `push` event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushMessage {
    data: Option<Vec<u8>>,
}

impl PushMessage {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }

    pub fn empty() -> Self {
        Self { data: None }
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    pub fn text(&self) -> Option<Cow<'_, str>> {
        self.data.as_deref().map(String::from_utf8_lossy)
    }

    /// Parse the body as JSON. An absent body parses like an empty one.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(self.data.as_deref().unwrap_or_default())
    }
}

/// A notification previously displayed by the worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShownNotification {
    pub title: String,
    pub tag: String,
    pub data: Option<NotificationData>,
}

impl ShownNotification {
    pub fn delivery_id(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.delivery_id.as_deref())
    }

    pub fn url(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.url.as_deref())
    }
}

/// Payload of `notificationclick` / `notificationclose` / `notificationshow`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationEvent {
    pub notification: ShownNotification,
    /// Id of the action button that was pressed, if any.
    pub action: Option<String>,
}

impl NotificationEvent {
    pub fn new(notification: ShownNotification) -> Self {
        Self {
            notification,
            action: None,
        }
    }
}

/// An event forwarded by the host runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerEvent {
    Push(PushMessage),
    NotificationClick(NotificationEvent),
    NotificationClose(NotificationEvent),
    NotificationShow(NotificationEvent),
}

impl WorkerEvent {
    pub fn kind(&self) -> WorkerEventKind {
        match self {
            Self::Push(_) => WorkerEventKind::Push,
            Self::NotificationClick(_) => WorkerEventKind::NotificationClick,
            Self::NotificationClose(_) => WorkerEventKind::NotificationClose,
            Self::NotificationShow(_) => WorkerEventKind::NotificationShow,
        }
    }

    pub fn notification(&self) -> Option<&ShownNotification> {
        match self {
            Self::Push(_) => None,
            Self::NotificationClick(e) | Self::NotificationClose(e) | Self::NotificationShow(e) => {
                Some(&e.notification)
            }
        }
    }
}
