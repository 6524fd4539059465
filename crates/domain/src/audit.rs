use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use steward_core::AppError;

use crate::Uid;

/// Collection receiving admin audit entries.
pub const ADMIN_AUDIT_COLLECTION: &str = "adminAudit";

/// Collection receiving notification log entries.
pub const NOTIFICATION_LOG_COLLECTION: &str = "notifications";

/// Stable audit action identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdminAuditAction {
    /// Admin claim granted through the callable endpoint.
    #[serde(rename = "promoteToAdmin")]
    PromoteToAdmin,
}

impl AdminAuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PromoteToAdmin => "promoteToAdmin",
        }
    }
}

impl FromStr for AdminAuditAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "promoteToAdmin" => Ok(Self::PromoteToAdmin),
            _ => Err(AppError::InvalidArgument(format!(
                "unknown audit action '{value}'"
            ))),
        }
    }
}

/// Immutable record of one admin promotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAuditEntry {
    /// Caller that granted the claim.
    pub promoter_uid: Uid,
    /// Principal that received the claim.
    pub target_uid: Uid,
    /// Creation time, serialized as epoch milliseconds.
    #[serde(rename = "ts", with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Audit action tag.
    pub action: AdminAuditAction,
}

impl AdminAuditEntry {
    /// Creates a `promoteToAdmin` audit entry.
    #[must_use]
    pub fn promote_to_admin(promoter_uid: Uid, target_uid: Uid, timestamp: DateTime<Utc>) -> Self {
        Self {
            promoter_uid,
            target_uid,
            timestamp,
            action: AdminAuditAction::PromoteToAdmin,
        }
    }
}

/// Kinds of notifications recorded in the notification log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// Account approval notice.
    Approval,
}

impl NotificationType {
    /// Returns a stable storage value for this notification type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approval => "approval",
        }
    }
}

/// Immutable record of one dispatched notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationLogEntry {
    /// Principal the notification was sent to.
    pub uid: Uid,
    /// Notification kind.
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// Creation time, serialized as epoch milliseconds.
    #[serde(rename = "ts", with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl NotificationLogEntry {
    /// Creates an `approval` log entry.
    #[must_use]
    pub fn approval(uid: Uid, timestamp: DateTime<Utc>) -> Self {
        Self {
            uid,
            notification_type: NotificationType::Approval,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::{AdminAuditAction, AdminAuditEntry, NotificationLogEntry};
    use crate::Uid;

    fn uid(value: &str) -> Uid {
        match Uid::new(value) {
            Ok(uid) => uid,
            Err(error) => panic!("valid uid expected: {error}"),
        }
    }

    #[test]
    fn audit_entry_uses_document_field_names() {
        let timestamp = Utc.timestamp_millis_opt(1_700_000_000_123).single();
        let Some(timestamp) = timestamp else {
            panic!("timestamp should be representable");
        };
        let entry = AdminAuditEntry::promote_to_admin(uid("admin-1"), uid("u1"), timestamp);

        assert_eq!(
            serde_json::to_value(&entry).ok(),
            Some(json!({
                "promoterUid": "admin-1",
                "targetUid": "u1",
                "ts": 1_700_000_000_123_i64,
                "action": "promoteToAdmin",
            }))
        );
    }

    #[test]
    fn notification_entry_uses_document_field_names() {
        let Some(timestamp) = Utc.timestamp_millis_opt(5).single() else {
            panic!("timestamp should be representable");
        };
        let entry = NotificationLogEntry::approval(uid("u1"), timestamp);

        assert_eq!(
            serde_json::to_value(&entry).ok(),
            Some(json!({"uid": "u1", "type": "approval", "ts": 5}))
        );
    }

    #[test]
    fn audit_action_parses_its_storage_value() {
        let parsed = "promoteToAdmin".parse::<AdminAuditAction>().ok();
        assert_eq!(parsed, Some(AdminAuditAction::PromoteToAdmin));
        assert!("demote".parse::<AdminAuditAction>().is_err());
    }
}
