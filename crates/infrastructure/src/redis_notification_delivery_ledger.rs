//! Redis-backed notification delivery ledger.

use async_trait::async_trait;
use redis::AsyncCommands;
use steward_application::NotificationDeliveryLedger;
use steward_core::{AppError, AppResult};

/// Redis implementation of the delivery ledger port using `SET NX EX`.
#[derive(Clone)]
pub struct RedisNotificationDeliveryLedger {
    client: redis::Client,
    key_prefix: String,
    ttl_seconds: u64,
}

impl RedisNotificationDeliveryLedger {
    /// Creates a ledger with a configured Redis client, key prefix and key lifetime.
    #[must_use]
    pub fn new(client: redis::Client, key_prefix: impl Into<String>, ttl_seconds: u64) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
            ttl_seconds: ttl_seconds.max(1),
        }
    }

    fn key_for(&self, key: &str) -> String {
        format!("{}:{key}", self.key_prefix)
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|error| {
                AppError::Infrastructure(format!("failed to connect to redis: {error}"))
            })
    }
}

#[async_trait]
impl NotificationDeliveryLedger for RedisNotificationDeliveryLedger {
    async fn try_claim(&self, key: &str) -> AppResult<bool> {
        let mut connection = self.connection().await?;

        let reply: Option<String> = redis::cmd("SET")
            .arg(self.key_for(key))
            .arg(chrono::Utc::now().timestamp())
            .arg("NX")
            .arg("EX")
            .arg(self.ttl_seconds)
            .query_async(&mut connection)
            .await
            .map_err(|error| {
                AppError::Infrastructure(format!("failed to claim redis delivery key: {error}"))
            })?;

        Ok(reply.is_some())
    }

    async fn release(&self, key: &str) -> AppResult<()> {
        let mut connection = self.connection().await?;

        let _: i64 = connection.del(self.key_for(key)).await.map_err(|error| {
            AppError::Infrastructure(format!("failed to release redis delivery key: {error}"))
        })?;

        Ok(())
    }
}
