//! In-memory append-only collections for local development.

use async_trait::async_trait;
use steward_application::{AdminAuditRepository, NotificationLogRepository};
use steward_core::AppResult;
use steward_domain::{AdminAuditEntry, NotificationLogEntry};
use tokio::sync::RwLock;

/// In-memory `adminAudit` collection.
#[derive(Default)]
pub struct InMemoryAdminAuditRepository {
    entries: RwLock<Vec<AdminAuditEntry>>,
}

impl InMemoryAdminAuditRepository {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all entries in append order.
    pub async fn entries(&self) -> Vec<AdminAuditEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl AdminAuditRepository for InMemoryAdminAuditRepository {
    async fn append_entry(&self, entry: AdminAuditEntry) -> AppResult<()> {
        self.entries.write().await.push(entry);
        Ok(())
    }
}

/// In-memory `notifications` collection.
#[derive(Default)]
pub struct InMemoryNotificationLogRepository {
    entries: RwLock<Vec<NotificationLogEntry>>,
}

impl InMemoryNotificationLogRepository {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all entries in append order.
    pub async fn entries(&self) -> Vec<NotificationLogEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl NotificationLogRepository for InMemoryNotificationLogRepository {
    async fn append_entry(&self, entry: NotificationLogEntry) -> AppResult<()> {
        self.entries.write().await.push(entry);
        Ok(())
    }
}
