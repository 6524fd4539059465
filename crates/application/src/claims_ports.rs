use async_trait::async_trait;
use steward_core::AppResult;
use steward_domain::{CustomClaims, Uid};

/// Port for the identity provider's custom claim storage.
#[async_trait]
pub trait IdentityClaimsRepository: Send + Sync {
    /// Returns the current custom claims of an identity, if any were ever set.
    async fn get_custom_claims(&self, uid: &Uid) -> AppResult<Option<CustomClaims>>;

    /// Replaces the custom claims of an identity.
    async fn set_custom_claims(&self, uid: &Uid, claims: CustomClaims) -> AppResult<()>;
}
