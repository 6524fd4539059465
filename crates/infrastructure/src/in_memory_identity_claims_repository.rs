use std::collections::HashMap;

use async_trait::async_trait;
use steward_application::IdentityClaimsRepository;
use steward_core::AppResult;
use steward_domain::{CustomClaims, Uid};
use tokio::sync::RwLock;

/// In-memory claim storage for local development and tests.
#[derive(Default)]
pub struct InMemoryIdentityClaimsRepository {
    claims: RwLock<HashMap<Uid, CustomClaims>>,
}

impl InMemoryIdentityClaimsRepository {
    /// Creates an empty claim store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityClaimsRepository for InMemoryIdentityClaimsRepository {
    async fn get_custom_claims(&self, uid: &Uid) -> AppResult<Option<CustomClaims>> {
        Ok(self.claims.read().await.get(uid).cloned())
    }

    async fn set_custom_claims(&self, uid: &Uid, claims: CustomClaims) -> AppResult<()> {
        self.claims.write().await.insert(uid.clone(), claims);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use steward_application::IdentityClaimsRepository;
    use steward_domain::{CustomClaims, Uid};

    use super::InMemoryIdentityClaimsRepository;

    #[tokio::test]
    async fn set_replaces_previous_claims() {
        let repository = InMemoryIdentityClaimsRepository::new();
        let Ok(uid) = Uid::new("u1") else {
            panic!("valid uid expected");
        };

        assert!(matches!(repository.get_custom_claims(&uid).await, Ok(None)));
        assert!(
            repository
                .set_custom_claims(&uid, CustomClaims::admin())
                .await
                .is_ok()
        );

        let stored = repository.get_custom_claims(&uid).await.ok().flatten();
        assert_eq!(stored, Some(CustomClaims::admin()));
    }
}
