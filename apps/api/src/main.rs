//! Steward API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod auth;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use steward_application::AdminMaintenanceService;
use steward_core::AppError;
use steward_domain::Uid;
use tracing::info;

use crate::api_config::{ApiCommand, ApiConfig, init_tracing};
use crate::api_router::build_router;
use crate::api_services::{build_app_state, build_collaborators, connect_and_migrate};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    match &config.command {
        ApiCommand::Migrate => {
            connect_and_migrate(config.required_database_url()?).await?;
            info!("database migrations applied successfully");
            Ok(())
        }
        ApiCommand::SetAdminClaim(uid) => {
            let uid = Uid::new(uid.as_str())?;
            let pool = connect_and_migrate(config.required_database_url()?).await?;
            let collaborators = build_collaborators(Some(pool), &config)?;
            AdminMaintenanceService::new(collaborators.claims_repository)
                .set_admin_claim(&uid)
                .await
        }
        ApiCommand::Serve => serve(&config).await,
    }
}

async fn serve(config: &ApiConfig) -> Result<(), AppError> {
    let pool = match config.database_url.as_deref() {
        Some(database_url) => Some(connect_and_migrate(database_url).await?),
        None => None,
    };

    let collaborators = build_collaborators(pool, config)?;
    let app_state = build_app_state(collaborators, config);
    let app = build_router(app_state, config.cors_allowed_origin.as_deref())?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Infrastructure(format!("failed to bind listener: {error}")))?;

    info!(%address, "steward-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Infrastructure(format!("api server error: {error}")))
}
