use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One selectable value of a configured vocabulary (category or department)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VocabularyEntryDto {
    /// Stored on reports verbatim
    pub name: String,
    /// Lowercase, hyphenated form for URLs and CSS hooks
    pub slug: String,
}

impl VocabularyEntryDto {
    pub fn from_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            slug: slugify(name),
        }
    }
}

fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs() {
        assert_eq!(VocabularyEntryDto::from_name("Roads").slug, "roads");
        assert_eq!(
            VocabularyEntryDto::from_name("Parks & Recreation").slug,
            "parks-recreation"
        );
        assert_eq!(
            VocabularyEntryDto::from_name(" Code  Enforcement ").slug,
            "code-enforcement"
        );
    }
}
