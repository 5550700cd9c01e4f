use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Create admin routes (all require the admin role); nested under `/api/admin`
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/reports", get(handlers::list_reports))
        .route(
            "/reports/{id}",
            get(handlers::get_report).put(handlers::update_workflow),
        )
        .route("/reports/{id}/notes", post(handlers::add_note))
        .with_state(admin_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ReportingConfig;
    use crate::features::reports::models::NewReport;
    use crate::features::reports::repository::ReportRepository;
    use crate::shared::test_helpers::{admin, citizen, with_user, InMemoryReportRepository};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use uuid::Uuid;

    async fn setup() -> (Arc<AdminService>, Uuid) {
        let repository = Arc::new(InMemoryReportRepository::new());
        let report = repository
            .insert(NewReport {
                user_id: "citizen-1".to_string(),
                title: "Broken streetlight".to_string(),
                description: "Pole #42 dark since Monday".to_string(),
                category: "Lighting".to_string(),
                location_address: None,
                coordinates: None,
                media: vec![],
            })
            .await
            .unwrap();
        let service = Arc::new(AdminService::new(
            repository,
            Arc::new(ReportingConfig::default()),
        ));
        (service, report.id)
    }

    fn app(service: Arc<AdminService>) -> Router {
        Router::new().nest("/api/admin", routes(service))
    }

    #[tokio::test]
    async fn test_citizens_are_forbidden() {
        let (service, id) = setup().await;
        let server = TestServer::new(with_user(app(service), citizen("citizen-1"))).unwrap();

        server
            .get("/api/admin/reports")
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server
            .put(&format!("/api/admin/reports/{}", id))
            .json(&json!({ "status": "resolved", "priority": "low" }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let (service, _) = setup().await;
        let server = TestServer::new(app(service)).unwrap();

        server
            .get("/api/admin/reports")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_triage_flow() {
        let (service, id) = setup().await;
        let server = TestServer::new(with_user(app(service), admin())).unwrap();

        let updated: Value = server
            .put(&format!("/api/admin/reports/{}", id))
            .json(&json!({
                "status": "in-progress",
                "priority": "high",
                "assigned_department": "Utilities"
            }))
            .await
            .json();
        assert_eq!(updated["data"]["status"], "in-progress");
        assert_eq!(updated["data"]["priority"], "high");
        assert_eq!(updated["data"]["assigned_department"], "Utilities");

        server
            .post(&format!("/api/admin/reports/{}/notes", id))
            .json(&json!({ "visibility": "internal", "content": "Needs a bucket truck" }))
            .await
            .assert_status(StatusCode::CREATED);

        let detail: Value = server
            .get(&format!("/api/admin/reports/{}", id))
            .await
            .json();
        assert_eq!(detail["data"]["user_id"], "citizen-1");
        assert_eq!(
            detail["data"]["internal_notes"][0],
            "Clerk Kim: Needs a bucket truck"
        );
        assert!(detail["data"]["public_notes"].as_array().unwrap().is_empty());

        let list: Value = server
            .get("/api/admin/reports")
            .add_query_param("status", "in-progress")
            .await
            .json();
        assert_eq!(list["meta"]["total"], 1);
        assert_eq!(list["meta"]["page"], 1);
    }

    #[tokio::test]
    async fn test_invalid_status_is_bad_request() {
        let (service, id) = setup().await;
        let server = TestServer::new(with_user(app(service), admin())).unwrap();

        server
            .put(&format!("/api/admin/reports/{}", id))
            .json(&json!({ "status": "closed", "priority": "low" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_filter_uses_error_envelope() {
        let (service, _) = setup().await;
        let server = TestServer::new(with_user(app(service), admin())).unwrap();

        let response = server
            .get("/api/admin/reports")
            .add_query_param("priority", "critical")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["errors"][0].as_str().unwrap().starts_with("query: "));
    }
}
