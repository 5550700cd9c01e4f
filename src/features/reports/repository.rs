use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{NewReport, NoteVisibility, Report, WorkflowUpdate};

/// Persistence boundary for reports.
///
/// Listings are ordered by `created_at`, most recent first. Mutations return
/// `None` when the id does not exist.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn insert(&self, report: NewReport) -> Result<Report>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>>;

    async fn list_all(&self) -> Result<Vec<Report>>;

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Report>>;

    /// Persist status, priority and department in one statement
    async fn update_workflow(&self, id: Uuid, update: &WorkflowUpdate) -> Result<Option<Report>>;

    /// Append one note server-side; concurrent appends never overwrite each other
    async fn append_note(
        &self,
        id: Uuid,
        visibility: NoteVisibility,
        note: &str,
    ) -> Result<Option<Report>>;
}

/// Postgres-backed repository
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn insert(&self, report: NewReport) -> Result<Report> {
        let (lat, lng) = match report.coordinates {
            Some(c) => (Some(c.lat), Some(c.lng)),
            None => (None, None),
        };

        let created = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (
                user_id, title, description, category,
                location_address, location_lat, location_lng, media
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&report.user_id)
        .bind(&report.title)
        .bind(&report.description)
        .bind(&report.category)
        .bind(&report.location_address)
        .bind(lat)
        .bind(lng)
        .bind(Json(&report.media))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create report: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>> {
        sqlx::query_as::<_, Report>("SELECT * FROM reports WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get report {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn list_all(&self) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>("SELECT * FROM reports ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(
            "SELECT * FROM reports WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports for user {}: {:?}", user_id, e);
            AppError::Database(e)
        })
    }

    async fn update_workflow(&self, id: Uuid, update: &WorkflowUpdate) -> Result<Option<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            UPDATE reports
            SET status = $2, priority = $3, assigned_department = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.status)
        .bind(update.priority)
        .bind(&update.assigned_department)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update workflow for report {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn append_note(
        &self,
        id: Uuid,
        visibility: NoteVisibility,
        note: &str,
    ) -> Result<Option<Report>> {
        let sql = match visibility {
            NoteVisibility::Public => {
                "UPDATE reports SET public_notes = array_append(public_notes, $2), updated_at = NOW() WHERE id = $1 RETURNING *"
            }
            NoteVisibility::Internal => {
                "UPDATE reports SET internal_notes = array_append(internal_notes, $2), updated_at = NOW() WHERE id = $1 RETURNING *"
            }
        };

        sqlx::query_as::<_, Report>(sql)
            .bind(id)
            .bind(note)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to append note to report {}: {:?}", id, e);
                AppError::Database(e)
            })
    }
}
