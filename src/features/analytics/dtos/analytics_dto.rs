use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::reports::models::{ReportPriority, ReportStatus};

/// Aggregates over the full report collection, recomputed on every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsDto {
    pub total: usize,
    pub submitted: usize,
    /// Acknowledged plus in-progress
    pub in_progress: usize,
    pub resolved: usize,
    pub unassigned: usize,
    /// Whole percent, 0 when there are no reports
    pub resolution_rate: u32,
    pub by_status: Vec<StatusCountDto>,
    pub by_priority: Vec<PriorityCountDto>,
    pub by_category: Vec<CategoryStatsDto>,
    pub by_department: Vec<DepartmentStatsDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusCountDto {
    pub status: ReportStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PriorityCountDto {
    pub priority: ReportPriority,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryStatsDto {
    pub name: String,
    pub count: usize,
    pub resolved: usize,
    pub resolution_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DepartmentStatsDto {
    pub name: String,
    pub assigned: usize,
    pub resolved: usize,
    pub resolution_rate: u32,
}
