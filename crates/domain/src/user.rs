use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Collection holding principal documents (`Users/{uid}`).
pub const USERS_COLLECTION: &str = "Users";

/// Review status stored on a principal document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserStatus {
    /// Awaiting review.
    Pending,
    /// Review completed successfully.
    Approved,
    /// Any other stored value.
    Other(String),
}

impl UserStatus {
    /// Parses a stored status value.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns the stored representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Other(value) => value.as_str(),
        }
    }
}

/// Snapshot of a principal document as delivered by a document trigger.
///
/// Only `status` and `fcmToken` are interpreted; every other field is kept
/// verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    /// Raw status value. Non-string values are treated as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    /// Push delivery token for the principal's device.
    #[serde(rename = "fcmToken", default, skip_serializing_if = "Option::is_none")]
    pub fcm_token: Option<Value>,
    /// Remaining document fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserDocument {
    /// Returns the parsed status, if the document carries a string status.
    #[must_use]
    pub fn status(&self) -> Option<UserStatus> {
        self.status
            .as_ref()
            .and_then(Value::as_str)
            .map(UserStatus::parse)
    }

    /// Returns the delivery token when present and non-empty.
    #[must_use]
    pub fn delivery_token(&self) -> Option<&str> {
        self.fcm_token
            .as_ref()
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
    }
}

/// Returns true only for the `pending` to `approved` transition.
#[must_use]
pub fn is_approval_transition(before: &UserDocument, after: &UserDocument) -> bool {
    before.status() == Some(UserStatus::Pending) && after.status() == Some(UserStatus::Approved)
}
