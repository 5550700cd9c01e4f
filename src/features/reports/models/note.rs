use crate::shared::constants::UNATTRIBUTED_AUTHOR;

const AUTHOR_SEPARATOR: &str = ": ";

/// Stored form of a note: "{author}: {content}"
pub fn compose_note(author: &str, content: &str) -> String {
    format!("{}{}{}", author, AUTHOR_SEPARATOR, content.trim())
}

/// A public note read back as a comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNote {
    pub author: String,
    pub content: String,
}

/// Splits on the first separator; notes without one are unattributed
pub fn parse_note(note: &str) -> ParsedNote {
    match note.split_once(AUTHOR_SEPARATOR) {
        Some((author, content)) if !author.trim().is_empty() => ParsedNote {
            author: author.trim().to_string(),
            content: content.to_string(),
        },
        _ => ParsedNote {
            author: UNATTRIBUTED_AUTHOR.to_string(),
            content: note.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_trims_content() {
        assert_eq!(compose_note("Dana", "  fixed yet?  "), "Dana: fixed yet?");
    }

    #[test]
    fn test_parse_splits_on_first_separator() {
        let parsed = parse_note("Dana: note: still dark");
        assert_eq!(parsed.author, "Dana");
        assert_eq!(parsed.content, "note: still dark");
    }

    #[test]
    fn test_parse_without_author() {
        let parsed = parse_note("Crew dispatched");
        assert_eq!(parsed.author, "Citizen");
        assert_eq!(parsed.content, "Crew dispatched");
    }
}
