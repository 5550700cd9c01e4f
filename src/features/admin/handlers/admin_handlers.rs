use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::admin::dtos::*;
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireAdmin;
use crate::shared::types::{ApiResponse, Meta};

/// List all reports (filtered, paginated)
#[utoipa::path(
    get,
    path = "/api/admin/reports",
    operation_id = "admin_list_reports",
    params(AdminReportQuery),
    responses(
        (status = 200, description = "Reports, most recent first", body = ApiResponse<Vec<AdminReportDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_reports(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    AppQuery(params): AppQuery<AdminReportQuery>,
) -> Result<Json<ApiResponse<Vec<AdminReportDto>>>> {
    let (reports, total) = service.list_reports(&params).await?;
    let items: Vec<AdminReportDto> = reports.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta::paged(total, &params.pagination())),
    )))
}

/// Get any report, including internal notes
#[utoipa::path(
    get,
    path = "/api/admin/reports/{id}",
    operation_id = "admin_get_report",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<AdminReportDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Report not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_report(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AdminReportDto>>> {
    let report = service.get_report(id).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Save status, priority and assigned department together
#[utoipa::path(
    put,
    path = "/api/admin/reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    request_body = UpdateWorkflowDto,
    responses(
        (status = 200, description = "Workflow saved", body = ApiResponse<AdminReportDto>),
        (status = 400, description = "Unknown status, priority or department"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Report not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_workflow(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateWorkflowDto>,
) -> Result<Json<ApiResponse<AdminReportDto>>> {
    let report = service.update_workflow(&user, id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(report.into()),
        Some("Report updated successfully".to_string()),
        None,
    )))
}

/// Append a public or internal note
#[utoipa::path(
    post,
    path = "/api/admin/reports/{id}/notes",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    request_body = AddNoteDto,
    responses(
        (status = 201, description = "Note appended", body = ApiResponse<AdminReportDto>),
        (status = 400, description = "Empty note"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Report not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_note(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<AddNoteDto>,
) -> Result<(StatusCode, Json<ApiResponse<AdminReportDto>>)> {
    let report = service.add_note(&user, id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(report.into()), None, None)),
    ))
}
