use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

/// Citizen report routes; the caller applies the auth middleware
pub fn routes(report_service: Arc<ReportService>) -> Router {
    Router::new()
        .route(
            "/api/reports",
            get(handlers::list_reports).post(handlers::create_report),
        )
        .route("/api/reports/summary", get(handlers::get_summary))
        .route("/api/reports/{id}", get(handlers::get_report))
        .route(
            "/api/reports/{id}/comments",
            get(handlers::list_comments).post(handlers::add_comment),
        )
        .route("/api/reports/{id}/location", get(handlers::get_location))
        .with_state(report_service)
}
