use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use steward_core::AppError;

use crate::auth::{CallerContext, bearer_token};
use crate::error::ApiResult;
use crate::state::AppState;

pub const TRIGGER_SECRET_HEADER: &str = "x-steward-trigger-secret";

/// Verifies an optional bearer ID token and attaches the caller to the request.
pub async fn attach_caller(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let caller = match request.headers().get(header::AUTHORIZATION) {
        None => None,
        Some(value) => {
            let token = value
                .to_str()
                .ok()
                .and_then(bearer_token)
                .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_owned()))?;
            Some(state.id_token_verifier.verify(token)?)
        }
    };

    request.extensions_mut().insert(CallerContext(caller));
    Ok(next.run(request).await)
}

/// Accepts trigger deliveries only from holders of the shared trigger secret.
pub async fn require_trigger_secret(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let presented = request
        .headers()
        .get(TRIGGER_SECRET_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if presented.is_empty() || presented != state.trigger_shared_secret.as_str() {
        return Err(AppError::Unauthorized("trigger secret mismatch".to_owned()).into());
    }

    Ok(next.run(request).await)
}
