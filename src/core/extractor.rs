use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

/// JSON body extractor whose rejections use the `ApiResponse` error envelope
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(rejection_to_error)
    }
}

/// Shape errors (unknown enum value, wrong type) become field-style validation errors;
/// anything else about the body is a plain bad request
fn rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            AppError::Validation(format!("body: {}", err.body_text()))
        }
        JsonRejection::JsonSyntaxError(_) => {
            AppError::BadRequest("Request body is not valid JSON".to_string())
        }
        JsonRejection::MissingJsonContentType(_) => {
            AppError::BadRequest("Expected Content-Type: application/json".to_string())
        }
        other => AppError::BadRequest(other.body_text()),
    }
}

/// Query string extractor; a malformed parameter is a field-style validation error
pub struct AppQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection| AppError::Validation(format!("query: {}", rejection.body_text())))
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    /// Reads the identity stored by `auth_middleware`
    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Please sign in to continue".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::ReportStatus;
    use crate::shared::test_helpers::{citizen, with_user};
    use axum::{
        http::StatusCode,
        routing::{get, post},
        Router,
    };
    use axum_test::TestServer;
    use serde::Deserialize;
    use serde_json::{json, Value};

    #[derive(Deserialize)]
    struct StatusBody {
        status: ReportStatus,
    }

    async fn echo_status(user: AuthenticatedUser, AppJson(body): AppJson<StatusBody>) -> String {
        format!("{} {}", user.sub, body.status)
    }

    async fn echo_filter(AppQuery(filter): AppQuery<StatusBody>) -> String {
        filter.status.to_string()
    }

    fn router() -> Router {
        Router::new()
            .route("/status", post(echo_status))
            .route("/filter", get(echo_filter))
    }

    #[tokio::test]
    async fn test_accepts_well_formed_body() {
        let server = TestServer::new(with_user(router(), citizen("citizen-1"))).unwrap();

        let response = server
            .post("/status")
            .json(&json!({ "status": "in-progress" }))
            .await;

        response.assert_status_ok();
        response.assert_text("citizen-1 in-progress");
    }

    #[tokio::test]
    async fn test_unknown_enum_value_is_a_validation_error() {
        let server = TestServer::new(with_user(router(), citizen("citizen-1"))).unwrap();

        let response = server
            .post("/status")
            .json(&json!({ "status": "closed" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["errors"][0].as_str().unwrap().starts_with("body: "));
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let server = TestServer::new(router()).unwrap();

        let response = server
            .post("/status")
            .json(&json!({ "status": "resolved" }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_query_is_parsed() {
        let server = TestServer::new(router()).unwrap();

        let response = server.get("/filter").add_query_param("status", "resolved").await;

        response.assert_status_ok();
        response.assert_text("resolved");
    }

    #[tokio::test]
    async fn test_bad_query_value_uses_error_envelope() {
        let server = TestServer::new(router()).unwrap();

        let response = server.get("/filter").add_query_param("status", "closed").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["errors"][0].as_str().unwrap().starts_with("query: "));
    }
}
