use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// Connect, run the versioned migrations under `migrations/`, and disconnect.
/// The gateway serves no database-backed routes; this only bootstraps the
/// schema.
pub async fn run_migrations(database_url: &str) -> Result<(), sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url)
        .await?;

    info!("Running database migrations...");
    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| sqlx::Error::Protocol(e.to_string()))?;
    info!("Database migrations completed");

    pool.close().await;
    Ok(())
}
