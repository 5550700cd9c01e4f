use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::analytics::dtos::AnalyticsDto;
use crate::features::analytics::services::AnalyticsService;
use crate::features::auth::guards::RequireAdmin;
use crate::shared::types::ApiResponse;

/// Report analytics across every report
#[utoipa::path(
    get,
    path = "/api/admin/analytics",
    tag = "admin",
    responses(
        (status = 200, description = "Counts, breakdowns and resolution rates", body = ApiResponse<AnalyticsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_analytics(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AnalyticsService>>,
) -> Result<Json<ApiResponse<AnalyticsDto>>, AppError> {
    let analytics = service.get_analytics().await?;
    Ok(Json(ApiResponse::success(Some(analytics), None, None)))
}
