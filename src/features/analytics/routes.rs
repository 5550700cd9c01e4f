use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::analytics::handlers;
use crate::features::analytics::services::AnalyticsService;

/// Staff analytics routes
pub fn routes(analytics_service: Arc<AnalyticsService>) -> Router {
    Router::new()
        .route("/api/admin/analytics", get(handlers::get_analytics))
        .with_state(analytics_service)
}
