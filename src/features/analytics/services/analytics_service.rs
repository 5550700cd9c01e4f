use std::sync::Arc;

use crate::core::config::ReportingConfig;
use crate::core::error::Result;
use crate::features::analytics::dtos::*;
use crate::features::reports::models::{Report, ReportPriority, ReportStatus};
use crate::features::reports::repository::ReportRepository;

/// Service for staff analytics
pub struct AnalyticsService {
    repository: Arc<dyn ReportRepository>,
    reporting: Arc<ReportingConfig>,
}

impl AnalyticsService {
    pub fn new(repository: Arc<dyn ReportRepository>, reporting: Arc<ReportingConfig>) -> Self {
        Self {
            repository,
            reporting,
        }
    }

    pub async fn get_analytics(&self) -> Result<AnalyticsDto> {
        let reports = self.repository.list_all().await?;
        Ok(compute_analytics(&reports, &self.reporting))
    }
}

/// Whole percent rounded half up; 0 when `whole` is 0
pub fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part * 200 + whole) / (2 * whole)) as u32
}

#[derive(Default)]
struct Tally {
    count: usize,
    resolved: usize,
}

/// Groups keyed by name: configured names first, then names only found in data
struct Groups {
    entries: Vec<(String, Tally)>,
}

impl Groups {
    fn seeded(names: &[String]) -> Self {
        Self {
            entries: names
                .iter()
                .map(|n| (n.clone(), Tally::default()))
                .collect(),
        }
    }

    fn record(&mut self, name: &str, resolved: bool) {
        let index = match self.entries.iter().position(|(n, _)| n == name) {
            Some(i) => i,
            None => {
                self.entries.push((name.to_string(), Tally::default()));
                self.entries.len() - 1
            }
        };
        let tally = &mut self.entries[index].1;
        tally.count += 1;
        if resolved {
            tally.resolved += 1;
        }
    }
}

pub fn compute_analytics(reports: &[Report], reporting: &ReportingConfig) -> AnalyticsDto {
    let total = reports.len();
    let count_status = |status: ReportStatus| reports.iter().filter(|r| r.status == status).count();
    let resolved = count_status(ReportStatus::Resolved);

    let mut categories = Groups::seeded(&reporting.categories);
    let mut departments = Groups::seeded(&reporting.departments);
    for report in reports {
        let is_resolved = report.status == ReportStatus::Resolved;
        categories.record(&report.category, is_resolved);
        if let Some(department) = report.assigned_department.as_deref() {
            departments.record(department, is_resolved);
        }
    }

    AnalyticsDto {
        total,
        submitted: count_status(ReportStatus::Submitted),
        in_progress: reports.iter().filter(|r| r.status.is_active()).count(),
        resolved,
        unassigned: reports
            .iter()
            .filter(|r| r.assigned_department.is_none())
            .count(),
        resolution_rate: percent(resolved, total),
        by_status: ReportStatus::ALL
            .iter()
            .map(|&status| StatusCountDto {
                status,
                count: count_status(status),
            })
            .collect(),
        by_priority: ReportPriority::ALL
            .iter()
            .map(|&priority| PriorityCountDto {
                priority,
                count: reports.iter().filter(|r| r.priority == priority).count(),
            })
            .collect(),
        by_category: categories
            .entries
            .into_iter()
            .map(|(name, t)| CategoryStatsDto {
                name,
                count: t.count,
                resolved: t.resolved,
                resolution_rate: percent(t.resolved, t.count),
            })
            .collect(),
        by_department: departments
            .entries
            .into_iter()
            .map(|(name, t)| DepartmentStatsDto {
                name,
                assigned: t.count,
                resolved: t.resolved,
                resolution_rate: percent(t.resolved, t.count),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn report(category: &str, status: ReportStatus, department: Option<&str>) -> Report {
        Report {
            id: Uuid::new_v4(),
            user_id: "citizen-1".to_string(),
            title: "Issue".to_string(),
            description: "Details".to_string(),
            category: category.to_string(),
            status,
            priority: ReportPriority::Medium,
            location_address: None,
            location_lat: None,
            location_lng: None,
            media: Json(vec![]),
            assigned_department: department.map(String::from),
            public_notes: vec![],
            internal_notes: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(0, 5), 0);
        assert_eq!(percent(5, 5), 100);
        assert_eq!(percent(0, 0), 0);
    }

    #[test]
    fn test_empty_collection_is_all_zero() {
        let analytics = compute_analytics(&[], &ReportingConfig::default());

        assert_eq!(analytics.total, 0);
        assert_eq!(analytics.resolution_rate, 0);
        assert_eq!(analytics.by_status.len(), 4);
        assert!(analytics.by_status.iter().all(|s| s.count == 0));
        assert_eq!(analytics.by_category.len(), 8);
        assert!(analytics.by_category.iter().all(|c| c.resolution_rate == 0));
    }

    #[test]
    fn test_category_resolution_rate() {
        let reports = vec![
            report("Roads", ReportStatus::Resolved, None),
            report("Roads", ReportStatus::Resolved, None),
            report("Roads", ReportStatus::InProgress, None),
            report("Lighting", ReportStatus::Submitted, None),
        ];

        let analytics = compute_analytics(&reports, &ReportingConfig::default());
        let roads = analytics
            .by_category
            .iter()
            .find(|c| c.name == "Roads")
            .unwrap();

        assert_eq!(roads.count, 3);
        assert_eq!(roads.resolved, 2);
        assert_eq!(roads.resolution_rate, 67);
        assert_eq!(analytics.resolution_rate, 50);
    }

    #[test]
    fn test_status_and_priority_breakdowns() {
        let mut high = report("Water", ReportStatus::Acknowledged, None);
        high.priority = ReportPriority::High;
        let reports = vec![
            high,
            report("Water", ReportStatus::InProgress, None),
            report("Water", ReportStatus::Submitted, None),
        ];

        let analytics = compute_analytics(&reports, &ReportingConfig::default());

        assert_eq!(analytics.in_progress, 2);
        assert_eq!(analytics.submitted, 1);
        assert_eq!(
            analytics.by_status,
            vec![
                StatusCountDto { status: ReportStatus::Submitted, count: 1 },
                StatusCountDto { status: ReportStatus::Acknowledged, count: 1 },
                StatusCountDto { status: ReportStatus::InProgress, count: 1 },
                StatusCountDto { status: ReportStatus::Resolved, count: 0 },
            ]
        );
        assert_eq!(analytics.by_priority[1].count, 2);
        assert_eq!(analytics.by_priority[2].count, 1);
    }

    #[test]
    fn test_departments_include_unconfigured_names_last() {
        let config = ReportingConfig {
            categories: vec!["Roads".to_string()],
            departments: vec!["Public Works".to_string()],
        };
        let reports = vec![
            report("Roads", ReportStatus::Resolved, Some("Public Works")),
            report("Roads", ReportStatus::Submitted, Some("Public Works")),
            report("Roads", ReportStatus::Submitted, Some("Night Crew")),
            report("Roads", ReportStatus::Submitted, None),
        ];

        let analytics = compute_analytics(&reports, &config);

        assert_eq!(analytics.unassigned, 1);
        assert_eq!(
            analytics.by_department,
            vec![
                DepartmentStatsDto {
                    name: "Public Works".to_string(),
                    assigned: 2,
                    resolved: 1,
                    resolution_rate: 50,
                },
                DepartmentStatsDto {
                    name: "Night Crew".to_string(),
                    assigned: 1,
                    resolved: 0,
                    resolution_rate: 0,
                },
            ]
        );
    }
}
