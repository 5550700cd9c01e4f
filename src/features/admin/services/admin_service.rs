use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::core::config::ReportingConfig;
use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::{AddNoteDto, AdminReportQuery, UpdateWorkflowDto};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::models::{compose_note, Report, WorkflowUpdate};
use crate::features::reports::repository::ReportRepository;

/// Triage operations over every report
pub struct AdminService {
    repository: Arc<dyn ReportRepository>,
    reporting: Arc<ReportingConfig>,
}

impl AdminService {
    pub fn new(repository: Arc<dyn ReportRepository>, reporting: Arc<ReportingConfig>) -> Self {
        Self {
            repository,
            reporting,
        }
    }

    /// Filtered, most recent first, one page; the total counts every match
    pub async fn list_reports(&self, query: &AdminReportQuery) -> Result<(Vec<Report>, i64)> {
        let matching: Vec<Report> = self
            .repository
            .list_all()
            .await?
            .into_iter()
            .filter(|r| query.matches(r))
            .collect();

        let total = matching.len() as i64;
        Ok((query.pagination().apply(matching), total))
    }

    pub async fn get_report(&self, id: Uuid) -> Result<Report> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    /// Any status may follow any other; only the department is checked against configuration
    pub async fn update_workflow(
        &self,
        admin: &AuthenticatedUser,
        id: Uuid,
        dto: UpdateWorkflowDto,
    ) -> Result<Report> {
        dto.validate()?;

        let assigned_department = dto
            .assigned_department
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from);

        if let Some(department) = assigned_department.as_deref() {
            if !self.reporting.has_department(department) {
                return Err(AppError::Validation(format!(
                    "assigned_department: must be one of {}",
                    self.reporting.departments.join(", ")
                )));
            }
        }

        let update = WorkflowUpdate {
            status: dto.status,
            priority: dto.priority,
            assigned_department,
        };

        let report = self
            .repository
            .update_workflow(id, &update)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        tracing::info!(
            "Report {} set to status={} priority={} department={:?} by {}",
            id,
            report.status,
            report.priority,
            report.assigned_department,
            admin.sub
        );

        Ok(report)
    }

    pub async fn add_note(
        &self,
        admin: &AuthenticatedUser,
        id: Uuid,
        dto: AddNoteDto,
    ) -> Result<Report> {
        dto.validate()?;

        let note = compose_note(&admin.display_name(), &dto.content);
        let report = self
            .repository
            .append_note(id, dto.visibility, &note)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        tracing::info!("{:?} note added to report {} by {}", dto.visibility, id, admin.sub);
        Ok(report)
    }
}
