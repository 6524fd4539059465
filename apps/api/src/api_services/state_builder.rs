use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use steward_application::{
    AdminAuditRepository, ApprovalNotificationService, IdentityClaimsRepository,
    NotificationDeliveryLedger, NotificationLogRepository, PromotionService,
    PushNotificationSender,
};
use steward_core::AppError;
use steward_infrastructure::{
    ConsolePushNotificationSender, HttpPushNotificationSender, InMemoryAdminAuditRepository,
    InMemoryIdentityClaimsRepository, InMemoryNotificationDeliveryLedger,
    InMemoryNotificationLogRepository, PostgresAdminAuditRepository,
    PostgresIdentityClaimsRepository, PostgresNotificationLogRepository,
    RedisNotificationDeliveryLedger,
};
use tracing::warn;

use crate::api_config::{ApiConfig, PushProviderConfig};
use crate::auth::IdTokenVerifier;
use crate::state::AppState;

use super::build_redis_client;

const DELIVERY_LEDGER_KEY_PREFIX: &str = "steward:delivery";

/// Process-wide handles to the identity, document and messaging collaborators.
#[derive(Clone)]
pub struct Collaborators {
    pub claims_repository: Arc<dyn IdentityClaimsRepository>,
    pub admin_audit_repository: Arc<dyn AdminAuditRepository>,
    pub notification_log_repository: Arc<dyn NotificationLogRepository>,
    pub push_sender: Arc<dyn PushNotificationSender>,
    pub delivery_ledger: Arc<dyn NotificationDeliveryLedger>,
}

pub fn build_collaborators(
    pool: Option<PgPool>,
    config: &ApiConfig,
) -> Result<Collaborators, AppError> {
    let (claims_repository, admin_audit_repository, notification_log_repository): (
        Arc<dyn IdentityClaimsRepository>,
        Arc<dyn AdminAuditRepository>,
        Arc<dyn NotificationLogRepository>,
    ) = match pool {
        Some(pool) => (
            Arc::new(PostgresIdentityClaimsRepository::new(pool.clone())),
            Arc::new(PostgresAdminAuditRepository::new(pool.clone())),
            Arc::new(PostgresNotificationLogRepository::new(pool)),
        ),
        None => {
            warn!("DATABASE_URL is not set, claims and logs are kept in memory");
            (
                Arc::new(InMemoryIdentityClaimsRepository::new()),
                Arc::new(InMemoryAdminAuditRepository::new()),
                Arc::new(InMemoryNotificationLogRepository::new()),
            )
        }
    };

    let delivery_ledger: Arc<dyn NotificationDeliveryLedger> = match config.redis_url.as_deref() {
        Some(redis_url) => Arc::new(RedisNotificationDeliveryLedger::new(
            build_redis_client(redis_url)?,
            DELIVERY_LEDGER_KEY_PREFIX,
            config.delivery_ledger_ttl_seconds,
        )),
        None => Arc::new(InMemoryNotificationDeliveryLedger::new(
            config.delivery_ledger_ttl_seconds,
        )),
    };

    let push_sender: Arc<dyn PushNotificationSender> = match &config.push_provider {
        PushProviderConfig::Console => Arc::new(ConsolePushNotificationSender::new()),
        PushProviderConfig::Fcm(push_config) => {
            let http_client = reqwest::Client::builder()
                .timeout(Duration::from_millis(config.push_timeout_ms))
                .build()
                .map_err(|error| {
                    AppError::Configuration(format!("failed to build HTTP client: {error}"))
                })?;
            Arc::new(HttpPushNotificationSender::new(
                http_client,
                push_config.clone(),
            )?)
        }
    };

    Ok(Collaborators {
        claims_repository,
        admin_audit_repository,
        notification_log_repository,
        push_sender,
        delivery_ledger,
    })
}

pub fn build_app_state(collaborators: Collaborators, config: &ApiConfig) -> AppState {
    AppState {
        promotion_service: PromotionService::new(
            collaborators.claims_repository,
            collaborators.admin_audit_repository,
        ),
        approval_notification_service: ApprovalNotificationService::new(
            collaborators.push_sender,
            collaborators.notification_log_repository,
        )
        .with_delivery_ledger(collaborators.delivery_ledger),
        id_token_verifier: Arc::new(IdTokenVerifier::new(
            config.id_token_secret.as_str(),
            config.id_token_audience.as_deref(),
        )),
        trigger_shared_secret: config.trigger_shared_secret.clone(),
    }
}
