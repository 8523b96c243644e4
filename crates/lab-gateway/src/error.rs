//! Error types for the gateway
//!
//! [`GatewayError`] covers startup; [`AppError`] is the single place where
//! request failures become HTTP responses.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use blob_storage::StorageError;
use cat_api_client::CatApiError;
use lookaside_cache::CacheError;
use serde_json::json;

#[derive(Debug)]
pub enum GatewayError {
    Config(String),
    Cache(CacheError),
    Storage(StorageError),
    Upstream(CatApiError),
    Database(sqlx::Error),
    Io(Box<std::io::Error>),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Cache(e) => write!(f, "Cache error: {e}"),
            Self::Storage(e) => write!(f, "Storage error: {e}"),
            Self::Upstream(e) => write!(f, "Upstream client error: {e}"),
            Self::Database(e) => write!(f, "Database error: {e}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for GatewayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(_) => None,
            Self::Cache(e) => Some(e),
            Self::Storage(e) => Some(e),
            Self::Upstream(e) => Some(e),
            Self::Database(e) => Some(e),
            Self::Io(e) => Some(e.as_ref()),
        }
    }
}

impl From<CacheError> for GatewayError {
    fn from(err: CacheError) -> Self {
        Self::Cache(err)
    }
}

impl From<StorageError> for GatewayError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

impl From<CatApiError> for GatewayError {
    fn from(err: CatApiError) -> Self {
        Self::Upstream(err)
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err)
    }
}

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Box::new(err))
    }
}

impl From<tracing_subscriber::filter::ParseError> for GatewayError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Request-level failure. Only `detail` reaches the client; the cause is
/// logged at error level, which also reports it to Sentry.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    /// The request was refused by the extractor with its own status
    /// (oversized or malformed multipart bodies).
    Rejected(StatusCode, String),
    Upstream {
        detail: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::BadRequest(msg) => {
                tracing::warn!(detail = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!(detail = %msg, "Not found");
                (StatusCode::NOT_FOUND, msg)
            }
            AppError::Rejected(status, msg) => {
                tracing::warn!(status = status.as_u16(), detail = %msg, "Request rejected");
                (status, msg)
            }
            AppError::Upstream { detail, source } => {
                tracing::error!(detail, error = %source, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, detail.to_string())
            }
        };

        (status, axum::Json(json!({ "detail": detail }))).into_response()
    }
}

/// How a domain error maps onto a response
pub enum Failure {
    NotFound(String),
    BadRequest(String),
    Upstream,
}

/// Sorts domain errors into response classes. Anything not explicitly a
/// client error is an upstream failure.
pub trait Classify {
    fn classify(&self) -> Failure {
        Failure::Upstream
    }
}

impl Classify for CacheError {}

impl Classify for CatApiError {}

impl Classify for StorageError {
    fn classify(&self) -> Failure {
        match self {
            StorageError::NotFound(_) => Failure::NotFound(self.to_string()),
            StorageError::InvalidName(_) => Failure::BadRequest(self.to_string()),
            _ => Failure::Upstream,
        }
    }
}

/// Attach an endpoint's client-facing message to a domain result
pub trait ResultExt<T> {
    fn or_detail(self, detail: &'static str) -> std::result::Result<T, AppError>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Classify + std::error::Error + Send + Sync + 'static,
{
    fn or_detail(self, detail: &'static str) -> std::result::Result<T, AppError> {
        self.map_err(|err| match err.classify() {
            Failure::NotFound(msg) => AppError::NotFound(msg),
            Failure::BadRequest(msg) => AppError::BadRequest(msg),
            Failure::Upstream => AppError::Upstream {
                detail,
                source: Box::new(err),
            },
        })
    }
}
