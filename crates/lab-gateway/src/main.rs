//! Lab Gateway - cache, blob storage and cat API aggregator over HTTP
//!
//! Exposes a key/value cache, a blob-storage facade and a cached
//! pass-through to the cat fact and cat image APIs.

use lab_gateway::error::Result;
use lab_gateway::{db, start_server, telemetry, AppState, Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Use JSON format for Cloud Logging when LOG_FORMAT=json
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);
    telemetry::init_logging(json_logs)?;

    let config = Config::from_env()?;
    info!(
        port = config.port,
        environment = %config.environment,
        "Starting lab gateway"
    );

    // Error reporting is a no-op until a DSN is configured
    let _sentry = config.sentry_dsn.as_deref().map(|dsn| {
        info!("Error reporting enabled");
        sentry::init((
            dsn,
            sentry::ClientOptions {
                environment: Some(config.environment.clone().into()),
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    match &config.database_url {
        Some(url) => db::run_migrations(url).await?,
        None => info!("DATABASE_URL not set, skipping migrations"),
    }

    let state = AppState::from_config(&config).await?;

    start_server(state, config.port).await?;

    info!("Lab gateway stopped");
    Ok(())
}
