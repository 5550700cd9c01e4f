use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::media::dtos::UploadMediaDto;
use crate::features::media::services::{MediaService, MediaUpload};
use crate::features::reports::models::MediaAttachment;
use crate::shared::types::ApiResponse;

/// Upload report media
///
/// Accepts multipart/form-data with one or more `files` fields. The batch is
/// all or nothing: if any file fails, none are kept.
#[utoipa::path(
    post,
    path = "/api/media",
    tag = "media",
    request_body(
        content = UploadMediaDto,
        content_type = "multipart/form-data",
        description = "Repeat the `files` field once per file",
    ),
    responses(
        (status = 201, description = "All files uploaded", body = ApiResponse<Vec<MediaAttachment>>),
        (status = 400, description = "Missing, empty, oversized or disallowed file"),
        (status = 401, description = "Authentication required"),
        (status = 502, description = "Storage rejected the batch")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_media(
    user: AuthenticatedUser,
    State(service): State<Arc<MediaService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<Vec<MediaAttachment>>>), AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();
        if field_name != "files" && field_name != "file" {
            debug!("Ignoring unknown field: {}", field_name);
            continue;
        }

        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unnamed".to_string());

        let data = field.bytes().await.map_err(|e| {
            debug!("Failed to read file bytes: {}", e);
            AppError::BadRequest(format!("Failed to read file data: {}", e))
        })?;

        files.push(MediaUpload {
            file_name,
            content_type,
            data: data.to_vec(),
        });
    }

    let attachments = service.upload_batch(&user.sub, files).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(attachments),
            Some("Media uploaded successfully".to_string()),
            None,
        )),
    ))
}
