//! Fakes and identity helpers for unit and route tests

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, response::Response, Router};
use chrono::{Duration, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::models::{
    NewReport, NoteVisibility, Report, ReportPriority, ReportStatus, WorkflowUpdate,
};
use crate::features::reports::repository::ReportRepository;
use crate::modules::storage::ObjectStorage;
use crate::shared::constants::ROLE_ADMIN;

pub fn citizen(sub: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: sub.to_string(),
        email: Some(format!("{}@example.com", sub)),
        name: None,
        roles: vec![],
    }
}

pub fn admin() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "admin-1".to_string(),
        email: Some("clerk@city.gov".to_string()),
        name: Some("Clerk Kim".to_string()),
        roles: vec![ROLE_ADMIN.to_string()],
    }
}

/// Attach `user` to every request, standing in for the JWT middleware
pub fn with_user(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                let response: Response = next.run(request).await;
                response
            }
        },
    ))
}

/// Vec-backed repository; inserts are one second apart so ordering is deterministic
#[derive(Default)]
pub struct InMemoryReportRepository {
    reports: Mutex<Vec<Report>>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.reports.lock().unwrap().len()
    }

    fn sorted(mut reports: Vec<Report>) -> Vec<Report> {
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reports
    }

    fn update<F: FnOnce(&mut Report)>(&self, id: Uuid, f: F) -> Option<Report> {
        let mut reports = self.reports.lock().unwrap();
        let report = reports.iter_mut().find(|r| r.id == id)?;
        f(report);
        report.updated_at = Utc::now();
        Some(report.clone())
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn insert(&self, report: NewReport) -> Result<Report> {
        let mut reports = self.reports.lock().unwrap();
        let created_at = Utc::now() + Duration::seconds(reports.len() as i64);
        let created = Report {
            id: Uuid::new_v4(),
            user_id: report.user_id,
            title: report.title,
            description: report.description,
            category: report.category,
            status: ReportStatus::Submitted,
            priority: ReportPriority::Medium,
            location_address: report.location_address,
            location_lat: report.coordinates.map(|c| c.lat),
            location_lng: report.coordinates.map(|c| c.lng),
            media: Json(report.media),
            assigned_department: None,
            public_notes: vec![],
            internal_notes: vec![],
            created_at,
            updated_at: created_at,
        };
        reports.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Report>> {
        Ok(Self::sorted(self.reports.lock().unwrap().clone()))
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Report>> {
        let reports = self.reports.lock().unwrap();
        Ok(Self::sorted(
            reports
                .iter()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect(),
        ))
    }

    async fn update_workflow(&self, id: Uuid, update: &WorkflowUpdate) -> Result<Option<Report>> {
        Ok(self.update(id, |r| {
            r.status = update.status;
            r.priority = update.priority;
            r.assigned_department = update.assigned_department.clone();
        }))
    }

    async fn append_note(
        &self,
        id: Uuid,
        visibility: NoteVisibility,
        note: &str,
    ) -> Result<Option<Report>> {
        Ok(self.update(id, |r| match visibility {
            NoteVisibility::Public => r.public_notes.push(note.to_string()),
            NoteVisibility::Internal => r.internal_notes.push(note.to_string()),
        }))
    }
}

/// Map-backed object storage; uploads whose bytes start with a registered marker fail
#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    fail_markers: Mutex<HashSet<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_uploads_starting_with(&self, marker: &str) {
        self.fail_markers.lock().unwrap().insert(marker.to_string());
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload(
        &self,
        key: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> std::result::Result<String, AppError> {
        let should_fail = self
            .fail_markers
            .lock()
            .unwrap()
            .iter()
            .any(|m| data.starts_with(m.as_bytes()));
        if should_fail {
            return Err(AppError::ExternalServiceError(format!(
                "upload rejected for {}",
                key
            )));
        }

        self.objects.lock().unwrap().insert(key.to_string(), data);
        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> std::result::Result<(), AppError> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://media.test/civic-reports/{}", key)
    }

    fn public_prefix(&self) -> &str {
        "public"
    }
}
