use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::config::ReportingConfig;
use crate::features::categories::dtos::VocabularyEntryDto;
use crate::shared::types::{ApiResponse, Meta};

fn entries(names: &[String]) -> Json<ApiResponse<Vec<VocabularyEntryDto>>> {
    let items: Vec<VocabularyEntryDto> = names
        .iter()
        .map(|n| VocabularyEntryDto::from_name(n))
        .collect();
    let total = items.len() as i64;
    Json(ApiResponse::success(Some(items), None, Some(Meta::total(total))))
}

/// List report categories accepted at submission
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Configured categories", body = ApiResponse<Vec<VocabularyEntryDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(config): State<Arc<ReportingConfig>>,
) -> Json<ApiResponse<Vec<VocabularyEntryDto>>> {
    entries(&config.categories)
}

/// List departments reports can be assigned to
#[utoipa::path(
    get,
    path = "/api/departments",
    responses(
        (status = 200, description = "Configured departments", body = ApiResponse<Vec<VocabularyEntryDto>>),
    ),
    tag = "categories"
)]
pub async fn list_departments(
    State(config): State<Arc<ReportingConfig>>,
) -> Json<ApiResponse<Vec<VocabularyEntryDto>>> {
    entries(&config.departments)
}
