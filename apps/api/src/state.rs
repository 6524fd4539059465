use std::sync::Arc;

use steward_application::{ApprovalNotificationService, PromotionService};

use crate::auth::IdTokenVerifier;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub promotion_service: PromotionService,
    pub approval_notification_service: ApprovalNotificationService,
    pub id_token_verifier: Arc<IdTokenVerifier>,
    pub trigger_shared_secret: String,
}
