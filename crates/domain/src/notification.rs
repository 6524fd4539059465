use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Uid;

/// Title of the approval push notification.
pub const APPROVAL_TITLE: &str = "Approval Complete";

/// Body of the approval push notification.
pub const APPROVAL_BODY: &str = "Your account has been approved.";

/// Push message addressed to a single device token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    /// Opaque device delivery token.
    pub token: String,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
    /// String-valued data payload delivered alongside the notification.
    pub data: Map<String, Value>,
}

impl PushMessage {
    /// Builds the approval notice for a principal.
    #[must_use]
    pub fn approval(token: impl Into<String>, uid: &Uid) -> Self {
        let mut data = Map::new();
        data.insert("uid".to_owned(), Value::from(uid.as_str()));

        Self {
            token: token.into(),
            title: APPROVAL_TITLE.to_owned(),
            body: APPROVAL_BODY.to_owned(),
            data,
        }
    }
}
