use axum::extract::State;
use axum::response::Html;
use axum::Json;
use cat_api_client::{Fact, ImageRef};
use tracing::info;

use crate::error::{AppError, ResultExt};
use crate::external::CombinedCatInfo;
use crate::state::AppState;

/// GET /external/fact
pub async fn get_fact(State(state): State<AppState>) -> Result<Json<Fact>, AppError> {
    info!("Request cat fact");
    let fact = state
        .cats
        .get_fact()
        .await
        .or_detail("Failed to retrieve cat fact")?;
    Ok(Json(fact))
}

/// GET /external/image
pub async fn get_image(State(state): State<AppState>) -> Result<Json<ImageRef>, AppError> {
    info!("Request cat image");
    let image = state
        .cats
        .get_image()
        .await
        .or_detail("Failed to retrieve cat image")?;
    Ok(Json(image))
}

/// GET /external/cat
pub async fn get_cat(State(state): State<AppState>) -> Result<Json<CombinedCatInfo>, AppError> {
    info!("Request combined cat fact and image");
    let info = state
        .cats
        .get_combined()
        .await
        .or_detail("Failed to retrieve cat info")?;
    Ok(Json(info))
}

/// GET /external/cat/html
pub async fn get_cat_html(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    info!("Request cat HTML page");
    let page = state
        .cats
        .get_combined_html()
        .await
        .or_detail("Failed to load cat HTML")?;
    Ok(Html(page))
}
