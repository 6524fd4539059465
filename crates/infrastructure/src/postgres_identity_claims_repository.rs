use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::PgPool;
use sqlx::types::Json;

use steward_application::IdentityClaimsRepository;
use steward_core::{AppError, AppResult};
use steward_domain::{CustomClaims, Uid};

/// PostgreSQL-backed custom claim storage.
#[derive(Clone)]
pub struct PostgresIdentityClaimsRepository {
    pool: PgPool,
}

impl PostgresIdentityClaimsRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityClaimsRepository for PostgresIdentityClaimsRepository {
    async fn get_custom_claims(&self, uid: &Uid) -> AppResult<Option<CustomClaims>> {
        let claims = sqlx::query_scalar::<_, Json<Map<String, Value>>>(
            r#"
            SELECT claims
            FROM identity_claims
            WHERE uid = $1
            "#,
        )
        .bind(uid.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Infrastructure(format!("failed to load custom claims for '{uid}': {error}"))
        })?;

        Ok(claims.map(|Json(claims)| CustomClaims::from_map(claims)))
    }

    async fn set_custom_claims(&self, uid: &Uid, claims: CustomClaims) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO identity_claims (uid, claims, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (uid) DO UPDATE
            SET claims = EXCLUDED.claims,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(uid.as_str())
        .bind(Json(claims.into_map()))
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Infrastructure(format!("failed to set custom claims for '{uid}': {error}"))
        })?;

        Ok(())
    }
}
