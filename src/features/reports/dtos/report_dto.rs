use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::models::{
    parse_note, Coordinates, DashboardTab, Location, MediaAttachment, Report, ReportPriority,
    ReportStatus, TabCounts,
};
use crate::shared::validation::validate_not_blank;

/// Request DTO for submitting a report.
///
/// Missing text fields deserialize as empty strings so they fail validation
/// instead of JSON parsing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReportDto {
    #[serde(default)]
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 200, message = "must be at most 200 characters")
    )]
    pub title: String,

    #[serde(default)]
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 5000, message = "must be at most 5000 characters")
    )]
    pub description: String,

    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub category: String,

    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub location_address: Option<String>,

    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub location_lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub location_lng: Option<f64>,

    /// References returned by `POST /api/media`, in display order
    #[serde(default)]
    #[validate(length(max = 10, message = "at most 10 attachments per report"))]
    pub media: Vec<MediaAttachment>,
}

/// Response DTO for report as seen by its owner (internal notes are never included)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub short_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ReportStatus,
    pub priority: ReportPriority,
    pub location_address: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    /// Address, formatted coordinates, or "Location not specified"
    pub location_display: String,
    pub media: Vec<MediaAttachment>,
    pub assigned_department: Option<String>,
    pub public_notes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        let location_display =
            Location::new(r.location_address.as_deref(), r.coordinates()).offline_display();
        Self {
            short_id: r.short_id(),
            id: r.id,
            title: r.title,
            description: r.description,
            category: r.category,
            status: r.status,
            priority: r.priority,
            location_address: r.location_address,
            location_lat: r.location_lat,
            location_lng: r.location_lng,
            location_display,
            media: r.media.0,
            assigned_department: r.assigned_department,
            public_notes: r.public_notes,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Query for the citizen dashboard list
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct TabQuery {
    /// all | submitted | in-progress | resolved (default: all)
    #[serde(default)]
    pub tab: DashboardTab,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TabCountsDto {
    pub all: usize,
    pub submitted: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

impl From<TabCounts> for TabCountsDto {
    fn from(c: TabCounts) -> Self {
        Self {
            all: c.all,
            submitted: c.submitted,
            in_progress: c.in_progress,
            resolved: c.resolved,
        }
    }
}

/// A public note shown as a comment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentDto {
    /// "{report_id}-{index}"
    pub id: String,
    pub author: String,
    pub content: String,
}

impl CommentDto {
    pub fn from_notes(report_id: Uuid, notes: &[String]) -> Vec<Self> {
        notes
            .iter()
            .enumerate()
            .map(|(index, note)| {
                let parsed = parse_note(note);
                Self {
                    id: format!("{}-{}", report_id, index),
                    author: parsed.author,
                    content: parsed.content,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddCommentDto {
    #[serde(default)]
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 2000, message = "must be at most 2000 characters")
    )]
    pub content: String,
}

/// How a location display string was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    Address,
    Geocoded,
    Coordinates,
    Unspecified,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationDisplayDto {
    pub display: String,
    pub source: LocationSource,
    pub address: Option<String>,
    pub coordinates: Option<Coordinates>,
}
