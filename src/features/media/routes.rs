use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::media::handlers::upload_media;
use crate::features::media::services::MediaService;
use crate::shared::constants::{MAX_MEDIA_BATCH, MAX_MEDIA_FILE_SIZE};

/// Create routes for the media feature
pub fn routes(media_service: Arc<MediaService>) -> Router {
    Router::new()
        .route(
            "/api/media",
            // A full batch plus room for multipart framing
            post(upload_media).layer(DefaultBodyLimit::max(
                MAX_MEDIA_FILE_SIZE * MAX_MEDIA_BATCH + 1024 * 1024,
            )),
        )
        .with_state(media_service)
}
