use async_trait::async_trait;
use sqlx::PgPool;

use steward_application::NotificationLogRepository;
use steward_core::{AppError, AppResult};
use steward_domain::NotificationLogEntry;

/// PostgreSQL-backed append-only `notifications` collection.
#[derive(Clone)]
pub struct PostgresNotificationLogRepository {
    pool: PgPool,
}

impl PostgresNotificationLogRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationLogRepository for PostgresNotificationLogRepository {
    async fn append_entry(&self, entry: NotificationLogEntry) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notification_log (uid, notification_type, ts)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(entry.uid.as_str())
        .bind(entry.notification_type.as_str())
        .bind(entry.timestamp)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Infrastructure(format!("failed to append notification log entry: {error}"))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests;
