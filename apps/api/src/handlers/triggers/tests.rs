use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::{Value, json};
use steward_application::{ApprovalNotificationService, PromotionService};
use steward_domain::NotificationType;
use steward_infrastructure::{
    ConsolePushNotificationSender, InMemoryAdminAuditRepository,
    InMemoryIdentityClaimsRepository, InMemoryNotificationDeliveryLedger,
    InMemoryNotificationLogRepository,
};

use super::user_updated_trigger_handler;
use crate::auth::IdTokenVerifier;
use crate::auth::tests::TEST_SECRET;
use crate::dto::UserUpdatedTriggerRequest;
use crate::state::AppState;

fn state(log: Arc<InMemoryNotificationLogRepository>) -> AppState {
    AppState {
        promotion_service: PromotionService::new(
            Arc::new(InMemoryIdentityClaimsRepository::new()),
            Arc::new(InMemoryAdminAuditRepository::new()),
        ),
        approval_notification_service: ApprovalNotificationService::new(
            Arc::new(ConsolePushNotificationSender::new()),
            log,
        )
        .with_delivery_ledger(Arc::new(InMemoryNotificationDeliveryLedger::new(60))),
        id_token_verifier: Arc::new(IdTokenVerifier::new(TEST_SECRET, None)),
        trigger_shared_secret: "trigger-secret".to_owned(),
    }
}

fn request(value: Value) -> UserUpdatedTriggerRequest {
    match serde_json::from_value(value) {
        Ok(request) => request,
        Err(error) => panic!("trigger payload should deserialize: {error}"),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

#[tokio::test]
async fn approval_transition_is_delivered_once_per_event() {
    let log = Arc::new(InMemoryNotificationLogRepository::new());
    let state = state(log.clone());
    let payload = json!({
        "eventId": "evt-1",
        "before": {"status": "pending"},
        "after": {"status": "approved", "fcmToken": "tok1"},
    });

    let first = user_updated_trigger_handler(
        State(state.clone()),
        Path("u1".to_owned()),
        Json(request(payload.clone())),
    )
    .await
    .into_response();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(body_json(first).await, json!({"outcome": "delivered"}));

    let second = user_updated_trigger_handler(
        State(state),
        Path("u1".to_owned()),
        Json(request(payload)),
    )
    .await
    .into_response();
    assert_eq!(
        body_json(second).await,
        json!({"outcome": "skipped", "reason": "already_delivered"})
    );

    let entries = log.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].notification_type, NotificationType::Approval);
}

#[tokio::test]
async fn null_snapshot_is_skipped() {
    let log = Arc::new(InMemoryNotificationLogRepository::new());

    let response = user_updated_trigger_handler(
        State(state(log.clone())),
        Path("u1".to_owned()),
        Json(request(json!({"before": null, "after": {"status": "approved"}}))),
    )
    .await
    .into_response();

    assert_eq!(
        body_json(response).await,
        json!({"outcome": "skipped", "reason": "missing_snapshot"})
    );
    assert!(log.entries().await.is_empty());
}
