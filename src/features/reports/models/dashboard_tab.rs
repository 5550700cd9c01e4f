use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::report::ReportStatus;

/// Citizen dashboard filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DashboardTab {
    #[default]
    All,
    Submitted,
    InProgress,
    Resolved,
}

impl DashboardTab {
    pub fn includes(&self, status: ReportStatus) -> bool {
        match self {
            DashboardTab::All => true,
            DashboardTab::Submitted => status == ReportStatus::Submitted,
            DashboardTab::InProgress => status.is_active(),
            DashboardTab::Resolved => status == ReportStatus::Resolved,
        }
    }
}

/// Per-tab totals for one citizen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TabCounts {
    pub all: usize,
    pub submitted: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

impl TabCounts {
    pub fn tally<I: IntoIterator<Item = ReportStatus>>(statuses: I) -> Self {
        statuses.into_iter().fold(Self::default(), |mut counts, status| {
            counts.all += 1;
            if DashboardTab::Submitted.includes(status) {
                counts.submitted += 1;
            }
            if DashboardTab::InProgress.includes(status) {
                counts.in_progress += 1;
            }
            if DashboardTab::Resolved.includes(status) {
                counts.resolved += 1;
            }
            counts
        })
    }
}
