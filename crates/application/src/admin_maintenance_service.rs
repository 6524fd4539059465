use std::sync::Arc;

use steward_core::AppResult;
use steward_domain::Uid;
use tracing::info;

use crate::IdentityClaimsRepository;

/// Operator tooling for bootstrapping admins outside the callable flow.
#[derive(Clone)]
pub struct AdminMaintenanceService {
    claims_repository: Arc<dyn IdentityClaimsRepository>,
}

impl AdminMaintenanceService {
    /// Creates a maintenance service.
    #[must_use]
    pub fn new(claims_repository: Arc<dyn IdentityClaimsRepository>) -> Self {
        Self { claims_repository }
    }

    /// Sets `admin = true` on an identity without a caller check or audit entry.
    pub async fn set_admin_claim(&self, uid: &Uid) -> AppResult<()> {
        let claims = self
            .claims_repository
            .get_custom_claims(uid)
            .await?
            .unwrap_or_default()
            .with_admin();
        self.claims_repository.set_custom_claims(uid, claims).await?;

        info!(uid = %uid, "admin claim set");
        Ok(())
    }
}
