//! Callable handler granting the admin claim to another principal.

use std::sync::Arc;

use serde_json::Value;
use steward_core::{AppError, AppResult, CallerIdentity};
use steward_domain::{AdminAuditEntry, Uid};
use tracing::{error, info};

use crate::{AdminAuditRepository, IdentityClaimsRepository};

/// Payload of a `promoteToAdmin` invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromoteToAdminRequest {
    /// Raw `uid` field of the payload. Anything but a non-empty string is rejected.
    pub uid: Option<Value>,
}

impl PromoteToAdminRequest {
    /// Creates a request for a string uid.
    #[must_use]
    pub fn for_uid(uid: impl Into<String>) -> Self {
        Self {
            uid: Some(Value::String(uid.into())),
        }
    }
}

/// Successful result of a promotion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoteToAdminResult {
    /// Always `ok`.
    pub status: &'static str,
    /// Principal that received the claim.
    pub target_uid: Uid,
}

/// Checks the caller's privilege and the payload without touching any collaborator.
///
/// Returns the promoter and target uids on success.
pub fn authorize_promotion(
    caller: Option<&CallerIdentity>,
    request: &PromoteToAdminRequest,
) -> AppResult<(Uid, Uid)> {
    let caller = caller
        .filter(|caller| caller.is_admin())
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_owned()))?;
    let promoter_uid = Uid::new(caller.uid())
        .map_err(|_| AppError::Unauthorized("Unauthorized".to_owned()))?;

    let target_uid = request
        .uid
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|uid| Uid::new(uid).ok())
        .ok_or_else(|| AppError::InvalidArgument("Missing uid".to_owned()))?;

    Ok((promoter_uid, target_uid))
}

/// Application service behind the `promoteToAdmin` callable.
#[derive(Clone)]
pub struct PromotionService {
    claims_repository: Arc<dyn IdentityClaimsRepository>,
    audit_repository: Arc<dyn AdminAuditRepository>,
}

impl PromotionService {
    /// Creates a promotion service.
    #[must_use]
    pub fn new(
        claims_repository: Arc<dyn IdentityClaimsRepository>,
        audit_repository: Arc<dyn AdminAuditRepository>,
    ) -> Self {
        Self {
            claims_repository,
            audit_repository,
        }
    }

    /// Grants `admin = true` to the requested principal and records an audit entry.
    ///
    /// Existing claims on the target are preserved. The claim update and the
    /// audit append are not atomic: a failed append leaves the grant in place.
    pub async fn promote_to_admin(
        &self,
        caller: Option<&CallerIdentity>,
        request: PromoteToAdminRequest,
    ) -> AppResult<PromoteToAdminResult> {
        let (promoter_uid, target_uid) = authorize_promotion(caller, &request)?;

        let claims = self
            .claims_repository
            .get_custom_claims(&target_uid)
            .await?
            .unwrap_or_default()
            .with_admin();
        self.claims_repository
            .set_custom_claims(&target_uid, claims)
            .await?;

        let entry = AdminAuditEntry::promote_to_admin(
            promoter_uid.clone(),
            target_uid.clone(),
            chrono::Utc::now(),
        );
        if let Err(audit_error) = self.audit_repository.append_entry(entry).await {
            error!(
                promoter_uid = %promoter_uid,
                target_uid = %target_uid,
                error = %audit_error,
                "admin claim granted without audit entry"
            );
            return Err(audit_error);
        }

        info!(
            promoter_uid = %promoter_uid,
            target_uid = %target_uid,
            "promoted principal to admin"
        );

        Ok(PromoteToAdminResult {
            status: "ok",
            target_uid,
        })
    }
}
