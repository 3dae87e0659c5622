//! Push message payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Title used when a push notification carries none.
pub const DEFAULT_TITLE: &str = "MixologyCloud";
/// Notification channel identifier.
pub const CHANNEL_ID: &str = "mixology_channel";
/// Notification channel display name.
pub const CHANNEL_NAME: &str = "Mixology Notifications";

/// A message delivered by the push service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PushMessage {
    /// Display part of the message, if any.
    #[serde(default)]
    pub notification: Option<NotificationPayload>,
    /// Free-form data part of the message.
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Display part of a push message as sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NotificationPayload {
    /// Title, if the sender set one.
    #[serde(default)]
    pub title: Option<String>,
    /// Body, if the sender set one.
    #[serde(default)]
    pub body: Option<String>,
}

/// A notification ready to show to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Title.
    pub title: String,
    /// Body text.
    pub body: String,
}

impl PushMessage {
    /// Parses a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a valid push message.
    pub fn from_json(payload: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// The notification to show, or `None` for data-only messages.
    #[must_use]
    pub fn notification(&self) -> Option<Notification> {
        self.notification.as_ref().map(|payload| Notification {
            title: payload
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            body: payload.body.clone().unwrap_or_default(),
        })
    }
}
