use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::reports::dtos::ReportResponseDto;
use crate::features::reports::models::{NoteVisibility, Report, ReportPriority, ReportStatus};
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::PaginationQuery;
use crate::shared::validation::validate_not_blank;

// =============================================================================
// REPORT LIST
// =============================================================================

/// Query params for the triage list
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct AdminReportQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
    pub status: Option<ReportStatus>,
    pub priority: Option<ReportPriority>,
    pub category: Option<String>,
    /// Assigned department name
    pub department: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl AdminReportQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }

    pub fn matches(&self, report: &Report) -> bool {
        self.status.is_none_or(|s| report.status == s)
            && self.priority.is_none_or(|p| report.priority == p)
            && self
                .category
                .as_deref()
                .is_none_or(|c| report.category == c)
            && self
                .department
                .as_deref()
                .is_none_or(|d| report.assigned_department.as_deref() == Some(d))
    }
}

// =============================================================================
// REPORT DETAIL
// =============================================================================

/// Full record for staff, including the owner and internal notes
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminReportDto {
    #[serde(flatten)]
    pub report: ReportResponseDto,
    pub user_id: String,
    pub internal_notes: Vec<String>,
}

impl From<Report> for AdminReportDto {
    fn from(mut r: Report) -> Self {
        let user_id = std::mem::take(&mut r.user_id);
        let internal_notes = std::mem::take(&mut r.internal_notes);
        Self {
            report: r.into(),
            user_id,
            internal_notes,
        }
    }
}

// =============================================================================
// WORKFLOW
// =============================================================================

/// Status, priority and department are always saved together
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateWorkflowDto {
    pub status: ReportStatus,
    pub priority: ReportPriority,
    /// Omit, null or empty to leave the report unassigned
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub assigned_department: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddNoteDto {
    pub visibility: NoteVisibility,
    #[serde(default)]
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 2000, message = "must be at most 2000 characters")
    )]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let q: AdminReportQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.page_size, DEFAULT_PAGE_SIZE);
        assert!(q.status.is_none());
    }

    #[test]
    fn test_workflow_rejects_unknown_status() {
        let parsed = serde_json::from_value::<UpdateWorkflowDto>(serde_json::json!({
            "status": "closed",
            "priority": "low"
        }));
        assert!(parsed.is_err());
    }
}
