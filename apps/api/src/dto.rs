use serde::{Deserialize, Serialize};
use serde_json::Value;
use steward_application::{ApprovalOutcome, PromoteToAdminResult};
use steward_domain::UserDocument;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Callable protocol request envelope.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/callable-request.ts"
)]
pub struct CallableRequest {
    #[serde(default)]
    #[ts(type = "Record<string, unknown> | null")]
    pub data: Option<Value>,
}

impl CallableRequest {
    /// Returns a field of the `data` object, if any.
    pub fn data_field(&self, name: &str) -> Option<Value> {
        self.data
            .as_ref()
            .and_then(Value::as_object)
            .and_then(|data| data.get(name))
            .cloned()
    }
}

/// Result of a `promoteToAdmin` invocation.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/promote-to-admin-response.ts"
)]
pub struct PromoteToAdminResponse {
    pub status: &'static str,
    pub target_uid: String,
}

/// Callable protocol success envelope for `promoteToAdmin`.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/promote-to-admin-callable-response.ts"
)]
pub struct PromoteToAdminCallableResponse {
    pub result: PromoteToAdminResponse,
}

impl From<PromoteToAdminResult> for PromoteToAdminResponse {
    fn from(value: PromoteToAdminResult) -> Self {
        Self {
            status: value.status,
            target_uid: value.target_uid.into(),
        }
    }
}

/// Incoming `Users/{uid}` update delivery.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-updated-trigger-request.ts"
)]
pub struct UserUpdatedTriggerRequest {
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    #[ts(type = "Record<string, unknown> | null")]
    pub before: Option<UserDocument>,
    #[serde(default)]
    #[ts(type = "Record<string, unknown> | null")]
    pub after: Option<UserDocument>,
}

/// Outcome of a trigger delivery.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/trigger-outcome-response.ts"
)]
pub struct TriggerOutcomeResponse {
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl From<ApprovalOutcome> for TriggerOutcomeResponse {
    fn from(value: ApprovalOutcome) -> Self {
        match value {
            ApprovalOutcome::Delivered => Self {
                outcome: "delivered",
                reason: None,
            },
            ApprovalOutcome::Skipped(reason) => Self {
                outcome: "skipped",
                reason: Some(reason.as_str()),
            },
        }
    }
}
