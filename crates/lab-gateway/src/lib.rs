//! Lab Gateway Library
//!
//! Router, handlers and shared state for the gateway binary.

pub mod config;
pub mod db;
pub mod error;
pub mod external;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{AppError, GatewayError, Result, ResultExt};
pub use external::{CatService, CombinedCatInfo};
pub use server::{create_router, start_server};
pub use state::AppState;
