use axum::Json;
use axum::extract::{Extension, State};
use steward_application::PromoteToAdminRequest;

use crate::auth::CallerContext;
use crate::dto::{CallableRequest, PromoteToAdminCallableResponse, PromoteToAdminResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn promote_to_admin_handler(
    State(state): State<AppState>,
    Extension(CallerContext(caller)): Extension<CallerContext>,
    Json(payload): Json<CallableRequest>,
) -> ApiResult<Json<PromoteToAdminCallableResponse>> {
    let request = PromoteToAdminRequest {
        uid: payload.data_field("uid"),
    };

    let result = state
        .promotion_service
        .promote_to_admin(caller.as_ref(), request)
        .await?;

    Ok(Json(PromoteToAdminCallableResponse {
        result: PromoteToAdminResponse::from(result),
    }))
}
