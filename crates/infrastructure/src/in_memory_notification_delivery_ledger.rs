use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use steward_application::NotificationDeliveryLedger;
use steward_core::AppResult;
use tokio::sync::RwLock;

/// In-memory delivery ledger with per-key expiry.
pub struct InMemoryNotificationDeliveryLedger {
    entries: RwLock<HashMap<String, Instant>>,
    ttl: Duration,
}

impl InMemoryNotificationDeliveryLedger {
    /// Creates an empty ledger whose keys expire after `ttl_seconds`.
    #[must_use]
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::from_secs(ttl_seconds.max(1)),
        }
    }
}

#[async_trait]
impl NotificationDeliveryLedger for InMemoryNotificationDeliveryLedger {
    async fn try_claim(&self, key: &str) -> AppResult<bool> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, expires_at| *expires_at > now);

        if entries.contains_key(key) {
            return Ok(false);
        }

        let expires_at = now.checked_add(self.ttl).unwrap_or(now);
        entries.insert(key.to_owned(), expires_at);
        Ok(true)
    }

    async fn release(&self, key: &str) -> AppResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
