use async_trait::async_trait;
use sqlx::PgPool;

use steward_application::AdminAuditRepository;
use steward_core::{AppError, AppResult};
use steward_domain::AdminAuditEntry;

/// PostgreSQL-backed append-only `adminAudit` collection.
#[derive(Clone)]
pub struct PostgresAdminAuditRepository {
    pool: PgPool,
}

impl PostgresAdminAuditRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminAuditRepository for PostgresAdminAuditRepository {
    async fn append_entry(&self, entry: AdminAuditEntry) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO admin_audit (
                promoter_uid,
                target_uid,
                action,
                ts
            )
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(entry.promoter_uid.as_str())
        .bind(entry.target_uid.as_str())
        .bind(entry.action.as_str())
        .bind(entry.timestamp)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Infrastructure(format!("failed to append admin audit entry: {error}"))
        })?;

        Ok(())
    }
}
