use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use super::location::Coordinates;

/// Report status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    Submitted,
    Acknowledged,
    InProgress,
    Resolved,
}

impl ReportStatus {
    /// Lifecycle order
    pub const ALL: [ReportStatus; 4] = [
        ReportStatus::Submitted,
        ReportStatus::Acknowledged,
        ReportStatus::InProgress,
        ReportStatus::Resolved,
    ];

    /// Acknowledged and in-progress both count as being worked on
    pub fn is_active(&self) -> bool {
        matches!(self, ReportStatus::Acknowledged | ReportStatus::InProgress)
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Submitted => write!(f, "submitted"),
            ReportStatus::Acknowledged => write!(f, "acknowledged"),
            ReportStatus::InProgress => write!(f, "in-progress"),
            ReportStatus::Resolved => write!(f, "resolved"),
        }
    }
}

/// Report priority enum matching database enum
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "report_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl ReportPriority {
    pub const ALL: [ReportPriority; 3] = [
        ReportPriority::Low,
        ReportPriority::Medium,
        ReportPriority::High,
    ];
}

impl std::fmt::Display for ReportPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportPriority::Low => write!(f, "low"),
            ReportPriority::Medium => write!(f, "medium"),
            ReportPriority::High => write!(f, "high"),
        }
    }
}

/// What an uploaded file is, decided from its content type at upload time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let top_level = content_type.split('/').next()?;
        match top_level {
            "image" => Some(MediaKind::Image),
            "video" => Some(MediaKind::Video),
            "audio" => Some(MediaKind::Audio),
            _ => None,
        }
    }
}

/// Reference to a stored media object, kept in submission order on the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MediaAttachment {
    pub url: String,
    pub kind: MediaKind,
}

/// Which note log an append targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NoteVisibility {
    /// Visible to the citizen who owns the report
    Public,
    /// Staff only
    Internal,
}

/// Database model for report
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ReportStatus,
    pub priority: ReportPriority,
    pub location_address: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub media: Json<Vec<MediaAttachment>>,
    pub assigned_department: Option<String>,
    pub public_notes: Vec<String>,
    pub internal_notes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Report {
    /// Both halves of the pair must be stored; zero is a valid coordinate
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.location_lat, self.location_lng) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        }
    }

    /// First six characters of the id, upper-cased
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..6].to_uppercase()
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// Data for creating a new report; status and priority take their initial values in the store
#[derive(Debug, Clone)]
pub struct NewReport {
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location_address: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub media: Vec<MediaAttachment>,
}

/// The three triage fields saved together by staff
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowUpdate {
    pub status: ReportStatus,
    pub priority: ReportPriority,
    pub assigned_department: Option<String>,
}
