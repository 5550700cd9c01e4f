use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Characters not allowed in a storage key segment
    /// - "auth0|6543" -> "auth0_6543"
    /// - "../etc" -> "___etc"
    static ref UNSAFE_KEY_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_-]").unwrap();
}

/// Rejects empty and whitespace-only text
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Make an identity id safe to use as one path segment of an object key
pub fn sanitize_key_segment(value: &str) -> String {
    let cleaned = UNSAFE_KEY_CHARS.replace_all(value, "_");
    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned.into_owned()
    }
}
