use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use steward_core::AppError;

async fn connect_pool(database_url: &str) -> Result<PgPool, AppError> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|error| {
            AppError::Infrastructure(format!("failed to connect to database: {error}"))
        })
}

pub async fn connect_and_migrate(database_url: &str) -> Result<PgPool, AppError> {
    let pool = connect_pool(database_url).await?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Infrastructure(format!("failed to run migrations: {error}")))?;

    Ok(pool)
}
