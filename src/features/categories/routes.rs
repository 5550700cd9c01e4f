use std::sync::Arc;

use axum::{routing::get, Router};

use crate::core::config::ReportingConfig;
use crate::features::categories::handlers;

/// Public vocabulary routes (no authentication required)
pub fn routes(config: Arc<ReportingConfig>) -> Router {
    Router::new()
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/departments", get(handlers::list_departments))
        .with_state(config)
}
