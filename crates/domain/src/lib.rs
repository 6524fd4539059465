//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod audit;
mod claims;
mod notification;
mod user;

pub use audit::{
    ADMIN_AUDIT_COLLECTION, AdminAuditAction, AdminAuditEntry, NOTIFICATION_LOG_COLLECTION,
    NotificationLogEntry, NotificationType,
};
pub use claims::{CustomClaims, Uid};
pub use notification::{APPROVAL_BODY, APPROVAL_TITLE, PushMessage};
pub use user::{USERS_COLLECTION, UserDocument, UserStatus, is_approval_transition};
