use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{AppError, ResultExt};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CacheItem {
    pub key: String,
    pub value: Value,
    /// Seconds until expiry; omitted means the entry never expires
    #[serde(default)]
    pub ttl: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct SavedResponse {
    pub status: &'static str,
    pub key: String,
}

#[derive(Debug, Serialize)]
pub struct CacheValueResponse {
    pub key: String,
    pub value: Value,
}

/// POST /cache/set
pub async fn set_item(
    State(state): State<AppState>,
    Json(item): Json<CacheItem>,
) -> Result<Json<SavedResponse>, AppError> {
    info!(key = %item.key, ttl = ?item.ttl, "Set cache item");
    debug!(payload = %item.value, "Cache payload");

    state
        .cache
        .set_json(&item.key, &item.value, item.ttl)
        .await
        .or_detail("Cache set error")?;

    Ok(Json(SavedResponse {
        status: "saved",
        key: item.key,
    }))
}

/// GET /cache/get/{key}
pub async fn get_item(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<CacheValueResponse>, AppError> {
    info!(key = %key, "Get cache item");

    let value: Value = state
        .cache
        .get_json(&key)
        .await
        .or_detail("Cache get error")?
        .ok_or_else(|| AppError::NotFound("Key not found".into()))?;

    Ok(Json(CacheValueResponse { key, value }))
}
