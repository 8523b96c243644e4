use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::error::{AppError, ResultExt};
use crate::state::AppState;

/// Multipart field carrying the upload
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub files: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FileContentResponse {
    pub filename: String,
    pub content: String,
}

/// POST /storage/files
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MessageResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Rejected(e.status(), e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest("Uploaded file has no filename".into()))?;
        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::Rejected(e.status(), e.body_text()))?;

        info!(filename = %filename, size = content.len(), "Upload file");
        let stored = state
            .storage
            .upload(&filename, content.to_vec())
            .await
            .or_detail("Failed to upload file")?;

        return Ok(Json(MessageResponse {
            message: format!("File '{stored}' successfully uploaded."),
        }));
    }

    Err(AppError::BadRequest(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}

/// GET /storage/files
pub async fn list_files(State(state): State<AppState>) -> Result<Json<FileListResponse>, AppError> {
    let files = state
        .storage
        .list()
        .await
        .or_detail("Failed to list files")?;
    Ok(Json(FileListResponse { files }))
}

/// GET /storage/files/{filename}
///
/// Content is returned as a JSON string; bytes that are not valid UTF-8 are
/// replaced with U+FFFD.
pub async fn download_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<FileContentResponse>, AppError> {
    let bytes = state
        .storage
        .download(&filename)
        .await
        .or_detail("Failed to download file")?;

    Ok(Json(FileContentResponse {
        content: String::from_utf8_lossy(&bytes).into_owned(),
        filename,
    }))
}

/// DELETE /storage/files/{filename}
pub async fn delete_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .storage
        .delete(&filename)
        .await
        .or_detail("Failed to delete file")?;

    info!(filename = %filename, "Deleted file");
    Ok(Json(MessageResponse {
        message: format!("File '{filename}' successfully deleted."),
    }))
}
