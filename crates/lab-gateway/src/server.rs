//! HTTP server for gateway endpoints

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::routes;
use crate::state::AppState;

/// Create the HTTP router. Wrong methods on known paths answer 405, unknown
/// paths 404.
pub fn create_router(state: AppState) -> Router {
    let upload_limit = state.max_upload_bytes;

    Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health))
        // Cache
        .route("/cache/set", post(routes::cache::set_item))
        .route("/cache/get/{key}", get(routes::cache::get_item))
        // External APIs
        .route("/external/fact", get(routes::external::get_fact))
        .route("/external/image", get(routes::external::get_image))
        .route("/external/cat", get(routes::external::get_cat))
        .route("/external/cat/html", get(routes::external::get_cat_html))
        // Storage
        .route(
            "/storage/files",
            post(routes::storage::upload_file).get(routes::storage::list_files),
        )
        .route(
            "/storage/files/{filename}",
            get(routes::storage::download_file).delete(routes::storage::delete_file),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server and run until Ctrl-C
pub async fn start_server(state: AppState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
