use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use steward_core::{ADMIN_CLAIM, AppError, AppResult};

/// Identifier of a principal in the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(String);

impl Uid {
    /// Creates a validated uid.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::InvalidArgument(
                "uid must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the uid as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Uid {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

impl From<Uid> for String {
    fn from(value: Uid) -> Self {
        value.0
    }
}

/// Custom claim set attached to an identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomClaims(Map<String, Value>);

impl CustomClaims {
    /// Creates an empty claim set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a claim set from an existing JSON object.
    #[must_use]
    pub fn from_map(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    /// Returns the claim set `{ "admin": true }`.
    #[must_use]
    pub fn admin() -> Self {
        Self::new().with_admin()
    }

    /// Returns this claim set with `admin` set to `true`, keeping every other claim.
    #[must_use]
    pub fn with_admin(mut self) -> Self {
        self.0.insert(ADMIN_CLAIM.to_owned(), Value::Bool(true));
        self
    }

    /// Returns true when the `admin` claim is the boolean `true`.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self.0.get(ADMIN_CLAIM), Some(Value::Bool(true)))
    }

    /// Returns a claim value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the underlying JSON object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the claim set into its JSON object.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}
