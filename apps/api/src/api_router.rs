use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use steward_core::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

pub fn build_router(app_state: AppState, cors_allowed_origin: Option<&str>) -> Result<Router, AppError> {
    let callable_routes = Router::new()
        .route(
            "/callable/promoteToAdmin",
            post(handlers::callable::promote_to_admin_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::attach_caller,
        ));

    let trigger_routes = Router::new()
        .route(
            "/triggers/users/{uid}/updated",
            post(handlers::triggers::user_updated_trigger_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_trigger_secret,
        ));

    let mut app = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(callable_routes)
        .merge(trigger_routes)
        .layer(TraceLayer::new_for_http());

    if let Some(origin) = cors_allowed_origin {
        let cors_layer = CorsLayer::new()
            .allow_origin(HeaderValue::from_str(origin).map_err(|error| {
                AppError::Configuration(format!("invalid CORS_ALLOWED_ORIGIN: {error}"))
            })?)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE]);
        app = app.layer(cors_layer);
    }

    Ok(app.with_state(app_state))
}
