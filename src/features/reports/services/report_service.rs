use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::core::config::ReportingConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::media::MediaService;
use crate::features::reports::dtos::{
    AddCommentDto, CommentDto, CreateReportDto, LocationDisplayDto,
};
use crate::features::reports::models::{
    compose_note, Coordinates, DashboardTab, Location, NewReport, NoteVisibility, Report,
    TabCounts,
};
use crate::features::reports::repository::ReportRepository;
use crate::features::reports::services::GeocodingService;

/// Citizen-side report operations: submit, track, comment
pub struct ReportService {
    repository: Arc<dyn ReportRepository>,
    geocoding: Arc<GeocodingService>,
    media: Arc<MediaService>,
    reporting: Arc<ReportingConfig>,
}

impl ReportService {
    pub fn new(
        repository: Arc<dyn ReportRepository>,
        geocoding: Arc<GeocodingService>,
        media: Arc<MediaService>,
        reporting: Arc<ReportingConfig>,
    ) -> Self {
        Self {
            repository,
            geocoding,
            media,
            reporting,
        }
    }

    /// Create a report owned by `user`; it starts as submitted with medium priority
    pub async fn submit(&self, user: &AuthenticatedUser, dto: CreateReportDto) -> Result<Report> {
        dto.validate()?;

        let category = dto.category.trim();
        if !self.reporting.has_category(category) {
            return Err(AppError::Validation(format!(
                "category: must be one of {}",
                self.reporting.categories.join(", ")
            )));
        }

        let coordinates = match (dto.location_lat, dto.location_lng) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            (None, None) => None,
            _ => {
                return Err(AppError::Validation(
                    "location: latitude and longitude must be provided together".to_string(),
                ))
            }
        };
        let location = Location::new(dto.location_address.as_deref(), coordinates);

        self.media.verify_attachments(&user.sub, &dto.media)?;

        let report = self
            .repository
            .insert(NewReport {
                user_id: user.sub.clone(),
                title: dto.title.trim().to_string(),
                description: dto.description.trim().to_string(),
                category: category.to_string(),
                location_address: location.address,
                coordinates: location.coordinates,
                media: dto.media,
            })
            .await?;

        tracing::info!("Report {} submitted by {}", report.id, user.sub);
        Ok(report)
    }

    /// Caller's reports for one dashboard tab, most recent first
    pub async fn list_for_user(
        &self,
        user: &AuthenticatedUser,
        tab: DashboardTab,
    ) -> Result<Vec<Report>> {
        let reports = self.repository.list_by_user(&user.sub).await?;
        Ok(reports
            .into_iter()
            .filter(|r| tab.includes(r.status))
            .collect())
    }

    pub async fn tab_counts(&self, user: &AuthenticatedUser) -> Result<TabCounts> {
        let reports = self.repository.list_by_user(&user.sub).await?;
        Ok(TabCounts::tally(reports.iter().map(|r| r.status)))
    }

    /// Reports owned by someone else are reported as missing
    pub async fn get_for_owner(&self, user: &AuthenticatedUser, id: Uuid) -> Result<Report> {
        match self.repository.find_by_id(id).await? {
            Some(report) if report.is_owned_by(&user.sub) => Ok(report),
            _ => Err(AppError::NotFound(format!("Report {} not found", id))),
        }
    }

    pub async fn comments(&self, user: &AuthenticatedUser, id: Uuid) -> Result<Vec<CommentDto>> {
        let report = self.get_for_owner(user, id).await?;
        Ok(CommentDto::from_notes(report.id, &report.public_notes))
    }

    /// Append a public note authored by the report owner
    pub async fn add_comment(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        dto: AddCommentDto,
    ) -> Result<Vec<CommentDto>> {
        dto.validate()?;
        self.get_for_owner(user, id).await?;

        let note = compose_note(&user.display_name(), &dto.content);
        let report = self
            .repository
            .append_note(id, NoteVisibility::Public, &note)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        tracing::info!("Comment added to report {} by {}", id, user.sub);
        Ok(CommentDto::from_notes(report.id, &report.public_notes))
    }

    pub async fn location(&self, user: &AuthenticatedUser, id: Uuid) -> Result<LocationDisplayDto> {
        let report = self.get_for_owner(user, id).await?;
        let location = Location::new(report.location_address.as_deref(), report.coordinates());
        let resolved = self.geocoding.resolve(&location).await;

        Ok(LocationDisplayDto {
            display: resolved.display,
            source: resolved.source,
            address: location.address,
            coordinates: location.coordinates,
        })
    }
}
