use async_trait::async_trait;
use steward_core::AppResult;
use steward_domain::{AdminAuditEntry, NotificationLogEntry};

/// Port for the append-only `adminAudit` collection.
#[async_trait]
pub trait AdminAuditRepository: Send + Sync {
    /// Appends one audit entry.
    async fn append_entry(&self, entry: AdminAuditEntry) -> AppResult<()>;
}

/// Port for the append-only `notifications` collection.
#[async_trait]
pub trait NotificationLogRepository: Send + Sync {
    /// Appends one notification log entry.
    async fn append_entry(&self, entry: NotificationLogEntry) -> AppResult<()>;
}
