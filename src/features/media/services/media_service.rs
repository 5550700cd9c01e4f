use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::media::dtos::{
    get_extension_from_content_type, is_mime_type_allowed, kind_from_extension,
};
use crate::features::reports::models::{MediaAttachment, MediaKind};
use crate::modules::storage::ObjectStorage;
use crate::shared::constants::{MAX_MEDIA_BATCH, MAX_MEDIA_FILE_SIZE};
use crate::shared::validation::sanitize_key_segment;

/// One file read from the multipart body
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

struct PreparedUpload {
    file_name: String,
    key: String,
    kind: MediaKind,
    content_type: String,
    data: Vec<u8>,
}

/// Uploads report media to object storage
pub struct MediaService {
    storage: Arc<dyn ObjectStorage>,
}

impl MediaService {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }

    /// Upload a batch, all or nothing.
    ///
    /// Every file is validated before any upload starts. Uploads run
    /// concurrently; if one fails, the ones that succeeded are deleted and the
    /// batch fails. References come back in input order.
    pub async fn upload_batch(
        &self,
        owner_id: &str,
        files: Vec<MediaUpload>,
    ) -> Result<Vec<MediaAttachment>> {
        if files.is_empty() {
            return Err(AppError::BadRequest(
                "At least one file is required".to_string(),
            ));
        }
        if files.len() > MAX_MEDIA_BATCH {
            return Err(AppError::BadRequest(format!(
                "Too many files. Maximum is {} per upload",
                MAX_MEDIA_BATCH
            )));
        }

        let owner_segment = sanitize_key_segment(owner_id);
        let prepared = files
            .into_iter()
            .map(|file| self.prepare(&owner_segment, file))
            .collect::<Result<Vec<_>>>()?;

        let total = prepared.len();
        let storage = &self.storage;
        let results = join_all(prepared.into_iter().map(|upload| async move {
            let result = storage
                .upload(&upload.key, upload.data, &upload.content_type)
                .await;
            (upload.file_name, upload.key, upload.kind, result)
        }))
        .await;

        let mut attachments = Vec::with_capacity(total);
        let mut uploaded_keys = Vec::new();
        let mut failed = Vec::new();

        for (file_name, key, kind, result) in results {
            match result {
                Ok(url) => {
                    uploaded_keys.push(key);
                    attachments.push(MediaAttachment { url, kind });
                }
                Err(e) => {
                    warn!("Upload of '{}' failed: {}", file_name, e);
                    failed.push(file_name);
                }
            }
        }

        if !failed.is_empty() {
            self.rollback(&uploaded_keys).await;
            return Err(AppError::ExternalServiceError(format!(
                "Failed to upload {} of {} files: {}",
                failed.len(),
                total,
                failed.join(", ")
            )));
        }

        info!("Uploaded {} media files for user {}", total, owner_id);
        Ok(attachments)
    }

    /// Accept only references this service handed to `owner_id`, with the kind
    /// their stored extension implies
    pub fn verify_attachments(&self, owner_id: &str, attachments: &[MediaAttachment]) -> Result<()> {
        let owner_base = self.storage.public_url(&format!(
            "{}/{}/",
            self.storage.public_prefix(),
            sanitize_key_segment(owner_id)
        ));

        for (index, attachment) in attachments.iter().enumerate() {
            let file_name = attachment
                .url
                .strip_prefix(owner_base.as_str())
                .filter(|name| is_stored_file_name(name))
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "media[{}]: must be a file you uploaded through /api/media",
                        index
                    ))
                })?;

            let stored_kind = file_name
                .rsplit_once('.')
                .and_then(|(_, extension)| kind_from_extension(extension));
            if stored_kind != Some(attachment.kind) {
                return Err(AppError::Validation(format!(
                    "media[{}]: kind does not match the uploaded file",
                    index
                )));
            }
        }

        Ok(())
    }

    fn prepare(&self, owner_segment: &str, file: MediaUpload) -> Result<PreparedUpload> {
        if file.data.is_empty() {
            return Err(AppError::BadRequest(format!(
                "File '{}' is empty",
                file.file_name
            )));
        }

        if file.data.len() > MAX_MEDIA_FILE_SIZE {
            return Err(AppError::BadRequest(format!(
                "File '{}' is too large. Maximum size is {} MB",
                file.file_name,
                MAX_MEDIA_FILE_SIZE / 1024 / 1024
            )));
        }

        let (kind, extension) = match (
            is_mime_type_allowed(&file.content_type),
            MediaKind::from_content_type(&file.content_type),
            get_extension_from_content_type(&file.content_type),
        ) {
            (true, Some(kind), Some(ext)) => (kind, ext),
            _ => {
                return Err(AppError::BadRequest(format!(
                    "File type '{}' is not allowed",
                    file.content_type
                )))
            }
        };

        // {prefix}/{owner}/{timestamp_ms}-{random}.{ext}
        let key = format!(
            "{}/{}/{}-{}.{}",
            self.storage.public_prefix(),
            owner_segment,
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            extension
        );

        Ok(PreparedUpload {
            file_name: file.file_name,
            key,
            kind,
            content_type: file.content_type,
            data: file.data,
        })
    }

    async fn rollback(&self, keys: &[String]) {
        let deletions = join_all(keys.iter().map(|key| self.storage.delete(key))).await;
        for (key, result) in keys.iter().zip(deletions) {
            if let Err(e) = result {
                warn!("Failed to remove '{}' after a failed batch: {}", key, e);
            }
        }
    }
}

/// `{timestamp_ms}-{random}.{ext}` as generated by `prepare`; nothing that could leave the owner's folder
fn is_stored_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains("..")
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::MemoryStorage;

    fn upload(name: &str, content_type: &str, data: &[u8]) -> MediaUpload {
        MediaUpload {
            file_name: name.to_string(),
            content_type: content_type.to_string(),
            data: data.to_vec(),
        }
    }

    fn service() -> (Arc<MemoryStorage>, MediaService) {
        let storage = Arc::new(MemoryStorage::new());
        (storage.clone(), MediaService::new(storage))
    }

    #[tokio::test]
    async fn test_batch_returns_kinds_in_order() {
        let (storage, service) = service();

        let attachments = service
            .upload_batch(
                "auth0|42",
                vec![
                    upload("a.jpg", "image/jpeg", b"jpeg"),
                    upload("b.mov", "video/quicktime", b"mov"),
                    upload("c.m4a", "audio/x-m4a", b"m4a"),
                ],
            )
            .await
            .unwrap();

        let kinds: Vec<MediaKind> = attachments.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![MediaKind::Image, MediaKind::Video, MediaKind::Audio]);
        assert!(attachments[0].url.ends_with(".jpg"));
        assert!(attachments[1].url.ends_with(".mov"));

        let keys = storage.keys();
        assert_eq!(keys.len(), 3);
        assert!(keys.iter().all(|k| k.starts_with("public/auth0_42/")));
    }

    #[tokio::test]
    async fn test_disallowed_type_uploads_nothing() {
        let (storage, service) = service();

        let err = service
            .upload_batch(
                "user-1",
                vec![
                    upload("a.jpg", "image/jpeg", b"jpeg"),
                    upload("notes.pdf", "application/pdf", b"pdf"),
                ],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(storage.keys().is_empty());
    }

    #[tokio::test]
    async fn test_one_failed_upload_rolls_back_the_batch() {
        let (storage, service) = service();
        storage.fail_uploads_starting_with("BROKEN");

        let err = service
            .upload_batch(
                "user-1",
                vec![
                    upload("a.jpg", "image/jpeg", b"fine"),
                    upload("b.png", "image/png", b"BROKEN bytes"),
                    upload("c.gif", "image/gif", b"also fine"),
                ],
            )
            .await
            .unwrap_err();

        match err {
            AppError::ExternalServiceError(msg) => {
                assert!(msg.contains("1 of 3"));
                assert!(msg.contains("b.png"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(storage.keys().is_empty());
    }

    #[tokio::test]
    async fn test_empty_and_oversized_batches_are_rejected() {
        let (_, service) = service();

        assert!(matches!(
            service.upload_batch("user-1", vec![]).await,
            Err(AppError::BadRequest(_))
        ));

        let too_many = (0..=MAX_MEDIA_BATCH)
            .map(|i| upload(&format!("{}.jpg", i), "image/jpeg", b"x"))
            .collect();
        assert!(matches!(
            service.upload_batch("user-1", too_many).await,
            Err(AppError::BadRequest(_))
        ));

        assert!(matches!(
            service
                .upload_batch("user-1", vec![upload("empty.jpg", "image/jpeg", b"")])
                .await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_uploaded_references_verify_for_their_owner() {
        let (_, service) = service();
        let attachments = service
            .upload_batch(
                "auth0|42",
                vec![
                    upload("a.jpg", "image/jpeg", b"jpeg"),
                    upload("b.mp3", "audio/mpeg", b"mp3"),
                ],
            )
            .await
            .unwrap();

        assert!(service.verify_attachments("auth0|42", &attachments).is_ok());
        assert!(matches!(
            service.verify_attachments("someone-else", &attachments),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_foreign_and_escaping_urls_are_rejected() {
        let (_, service) = service();

        for url in [
            "https://evil.example/payload.exe",
            "https://media.test/civic-reports/public/user-1/../user-2/1-a.jpg",
            "https://media.test/civic-reports/public/user-1/nested/1-a.jpg",
            "https://media.test/civic-reports/public/user-1/",
        ] {
            let attachment = MediaAttachment {
                url: url.to_string(),
                kind: MediaKind::Image,
            };
            let err = service
                .verify_attachments("user-1", &[attachment])
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "accepted {}", url);
        }
    }

    #[test]
    fn test_kind_must_match_stored_extension() {
        let (_, service) = service();
        let relabelled = MediaAttachment {
            url: "https://media.test/civic-reports/public/user-1/1700000000000-abc.mp4".to_string(),
            kind: MediaKind::Image,
        };

        let err = service
            .verify_attachments("user-1", &[relabelled])
            .unwrap_err();

        match err {
            AppError::Validation(msg) => assert!(msg.starts_with("media[0]: kind")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
