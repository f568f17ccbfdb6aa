use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::debug;

use crate::cv_upload::{store_cv, CvFormat, CvUploadResponse};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/cv
/// Multipart form with a single `file` field.
pub async fn handle_upload_cv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CvUploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        // Reject before buffering the body.
        CvFormat::from_file_name(&file_name)?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        debug!("Received CV upload {file_name} ({} bytes)", data.len());

        let response = store_cv(&state.s3, &state.config.s3_bucket, &file_name, data).await?;
        return Ok(Json(response));
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}
