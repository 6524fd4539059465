//! ID token verification for callable endpoints.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use serde_json::{Map, Value};
use steward_core::{AppError, CallerIdentity};

/// Verified caller attached to every callable request. `None` when no token was sent.
#[derive(Debug, Clone, Default)]
pub struct CallerContext(pub Option<CallerIdentity>);

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: String,
    #[serde(flatten)]
    claims: Map<String, Value>,
}

/// HS256 verifier for identity-provider ID tokens.
pub struct IdTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl IdTokenVerifier {
    /// Creates a verifier. Without an expected audience the `aud` claim is not checked.
    pub fn new(secret: &str, audience: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        match audience {
            Some(audience) => {
                validation.set_required_spec_claims(&["exp", "sub", "aud"]);
                validation.set_audience(&[audience]);
            }
            None => {
                validation.set_required_spec_claims(&["exp", "sub"]);
                validation.validate_aud = false;
            }
        }

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verifies a bearer token and returns the caller with its custom claims.
    pub fn verify(&self, token: &str) -> Result<CallerIdentity, AppError> {
        let data = decode::<IdTokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| AppError::Unauthorized("Unauthorized".to_owned()))?;

        let mut claims = data.claims.claims;
        for registered in ["exp", "iat", "nbf", "iss", "aud"] {
            claims.remove(registered);
        }

        Ok(CallerIdentity::new(data.claims.sub, claims))
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
