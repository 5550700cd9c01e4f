use utoipa::ToSchema;

use crate::features::reports::models::MediaKind;

/// Multipart form for `POST /api/media`, for Swagger UI only.
/// The handler reads axum's `Multipart` directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadMediaDto {
    /// One or more files; repeat the `files` field per file
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub files: Vec<String>,
}

/// Content types accepted for report media
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "video/mp4",
    "video/webm",
    "video/quicktime",
    "audio/mpeg",
    "audio/wav",
    "audio/x-wav",
    "audio/mp4",
    "audio/x-m4a",
];

pub fn is_mime_type_allowed(content_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&content_type)
}

pub fn get_extension_from_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "video/mp4" => Some("mp4"),
        "video/webm" => Some("webm"),
        "video/quicktime" => Some("mov"),
        "audio/mpeg" => Some("mp3"),
        "audio/wav" | "audio/x-wav" => Some("wav"),
        "audio/mp4" | "audio/x-m4a" => Some("m4a"),
        _ => None,
    }
}

/// Kind implied by an extension this service assigns to uploads
pub fn kind_from_extension(extension: &str) -> Option<MediaKind> {
    ALLOWED_MIME_TYPES
        .iter()
        .find(|mime| get_extension_from_content_type(mime) == Some(extension))
        .and_then(|mime| MediaKind::from_content_type(mime))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_allowed_type_has_an_extension() {
        for mime in ALLOWED_MIME_TYPES {
            assert!(
                get_extension_from_content_type(mime).is_some(),
                "{} has no extension",
                mime
            );
        }
        assert!(!is_mime_type_allowed("application/pdf"));
    }

    #[test]
    fn test_extension_kinds_follow_upload_content_types() {
        assert_eq!(kind_from_extension("jpg"), Some(MediaKind::Image));
        assert_eq!(kind_from_extension("mp4"), Some(MediaKind::Video));
        assert_eq!(kind_from_extension("mov"), Some(MediaKind::Video));
        assert_eq!(kind_from_extension("m4a"), Some(MediaKind::Audio));
        assert_eq!(kind_from_extension("exe"), None);
    }
}
