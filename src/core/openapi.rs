use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::core::config::SwaggerConfig;
use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::analytics::{dtos as analytics_dtos, handlers as analytics_handlers};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::media::{dtos as media_dtos, handlers as media_handlers};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        reports_handlers::create_report,
        reports_handlers::list_reports,
        reports_handlers::get_summary,
        reports_handlers::get_report,
        reports_handlers::list_comments,
        reports_handlers::add_comment,
        reports_handlers::get_location,
        // Media
        media_handlers::upload_media,
        // Vocabulary
        categories_handlers::list_categories,
        categories_handlers::list_departments,
        // Admin
        admin_handlers::list_reports,
        admin_handlers::get_report,
        admin_handlers::update_workflow,
        admin_handlers::add_note,
        analytics_handlers::get_analytics,
    ),
    components(
        schemas(
            Meta,
            // Report models
            reports_models::ReportStatus,
            reports_models::ReportPriority,
            reports_models::MediaKind,
            reports_models::MediaAttachment,
            reports_models::NoteVisibility,
            reports_models::Coordinates,
            reports_models::DashboardTab,
            // Report DTOs
            reports_dtos::CreateReportDto,
            reports_dtos::ReportResponseDto,
            reports_dtos::TabCountsDto,
            reports_dtos::CommentDto,
            reports_dtos::AddCommentDto,
            reports_dtos::LocationSource,
            reports_dtos::LocationDisplayDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            ApiResponse<reports_dtos::TabCountsDto>,
            ApiResponse<Vec<reports_dtos::CommentDto>>,
            ApiResponse<reports_dtos::LocationDisplayDto>,
            // Media
            media_dtos::UploadMediaDto,
            ApiResponse<Vec<reports_models::MediaAttachment>>,
            // Vocabulary
            categories_dtos::VocabularyEntryDto,
            ApiResponse<Vec<categories_dtos::VocabularyEntryDto>>,
            // Admin
            admin_dtos::AdminReportDto,
            admin_dtos::UpdateWorkflowDto,
            admin_dtos::AddNoteDto,
            ApiResponse<admin_dtos::AdminReportDto>,
            ApiResponse<Vec<admin_dtos::AdminReportDto>>,
            // Analytics
            analytics_dtos::AnalyticsDto,
            analytics_dtos::StatusCountDto,
            analytics_dtos::PriorityCountDto,
            analytics_dtos::CategoryStatsDto,
            analytics_dtos::DepartmentStatsDto,
            ApiResponse<analytics_dtos::AnalyticsDto>,
        )
    ),
    tags(
        (name = "reports", description = "Citizen reports, comments and locations"),
        (name = "media", description = "Photo, video and audio uploads"),
        (name = "categories", description = "Configured categories and departments (public)"),
        (name = "admin", description = "Staff triage and analytics (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Civic Report API",
        version = "0.1.0",
        description = "API documentation for Civic Report",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl From<&SwaggerConfig> for SwaggerInfoModifier {
    fn from(config: &SwaggerConfig) -> Self {
        Self {
            title: config.title.clone(),
            version: config.version.clone(),
            description: config.description.clone(),
        }
    }
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
