use axum::Json;
use axum::extract::{Path, State};
use steward_application::UserUpdatedEvent;
use steward_core::AppError;
use steward_domain::Uid;

use crate::dto::{TriggerOutcomeResponse, UserUpdatedTriggerRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn user_updated_trigger_handler(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Json(payload): Json<UserUpdatedTriggerRequest>,
) -> ApiResult<Json<TriggerOutcomeResponse>> {
    let uid = Uid::new(uid)
        .map_err(|_| AppError::InvalidArgument("document path is missing uid".to_owned()))?;

    let outcome = state
        .approval_notification_service
        .handle_user_updated(UserUpdatedEvent {
            uid,
            event_id: payload.event_id,
            before: payload.before,
            after: payload.after,
        })
        .await?;

    Ok(Json(TriggerOutcomeResponse::from(outcome)))
}

#[cfg(test)]
mod tests;
