//! Shared primitives for all Rust crates in Steward.

#![forbid(unsafe_code)]

/// Authentication primitives shared across services.
pub mod auth;

use thiserror::Error;

pub use auth::{ADMIN_CLAIM, CallerIdentity};

/// Result type used across Steward crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
///
/// `Unauthorized` and `InvalidArgument` are policy rejections raised before any
/// collaborator is touched. `Infrastructure` covers failures of the claims
/// store, the document store, the push service and the delivery ledger.
#[derive(Debug, Error)]
pub enum AppError {
    /// Caller is not authenticated or lacks the required privilege.
    #[error("{0}")]
    Unauthorized(String),

    /// Request payload is malformed or missing required fields.
    #[error("{0}")]
    InvalidArgument(String),

    /// Process configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A collaborator call failed.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl AppError {
    /// Returns true when the error is a policy rejection rather than a dependency failure.
    #[must_use]
    pub fn is_policy_rejection(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::InvalidArgument(_))
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn policy_rejections_are_distinguished_from_dependency_failures() {
        assert!(AppError::Unauthorized("Unauthorized".to_owned()).is_policy_rejection());
        assert!(AppError::InvalidArgument("Missing uid".to_owned()).is_policy_rejection());
        assert!(!AppError::Infrastructure("redis down".to_owned()).is_policy_rejection());
        assert!(!AppError::Configuration("PORT".to_owned()).is_policy_rejection());
    }

    #[test]
    fn policy_rejection_messages_are_passed_through_verbatim() {
        assert_eq!(
            AppError::Unauthorized("Unauthorized".to_owned()).to_string(),
            "Unauthorized"
        );
        assert_eq!(
            AppError::InvalidArgument("Missing uid".to_owned()).to_string(),
            "Missing uid"
        );
    }
}
