use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claim key carrying the boolean admin privilege.
pub const ADMIN_CLAIM: &str = "admin";

/// Verified caller of a callable endpoint together with its token claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallerIdentity {
    uid: String,
    token_claims: Map<String, Value>,
}

impl CallerIdentity {
    /// Creates a caller identity from the verified token subject and claims.
    #[must_use]
    pub fn new(uid: impl Into<String>, token_claims: Map<String, Value>) -> Self {
        Self {
            uid: uid.into(),
            token_claims,
        }
    }

    /// Returns the stable uid of the caller.
    #[must_use]
    pub fn uid(&self) -> &str {
        self.uid.as_str()
    }

    /// Returns the raw claims carried by the caller's token.
    #[must_use]
    pub fn token_claims(&self) -> &Map<String, Value> {
        &self.token_claims
    }

    /// Returns true only when the token carries `admin` as the boolean `true`.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self.token_claims.get(ADMIN_CLAIM), Some(Value::Bool(true)))
    }
}
