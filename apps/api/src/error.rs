use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use steward_core::AppError;
use tracing::error;
use ts_rs::TS;

/// Callable protocol error details.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/callable-error.ts"
)]
pub struct CallableError {
    status: &'static str,
    message: String,
}

/// Callable protocol error envelope.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    error: CallableError,
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self.0 {
            AppError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", message)
            }
            AppError::InvalidArgument(message) => {
                (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", message)
            }
            other @ (AppError::Configuration(_) | AppError::Infrastructure(_)) => {
                error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "INTERNAL".to_owned(),
                )
            }
        };

        let payload = Json(ErrorResponse {
            error: CallableError {
                status: code,
                message,
            },
        });

        (status, payload).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
