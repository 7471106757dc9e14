//! Tag support for webnotes.
//!
//! Tags live in the `tags` field of a section. Every mutation path keeps that
//! list sorted and free of duplicates, and the field disappears once its last
//! tag is removed (see [`crate::model::Section::delete_tag`]).
//!
//! Tags arrive from the command line as one comma-separated string, which is
//! what [`parse_tag_list`] splits and validates.

pub mod validation;

pub use validation::{validate_tag, TagValidationError};

/// Splits `"a,b"` into validated tags. Surrounding whitespace around each item
/// is trimmed; the empty string yields no tags.
pub fn parse_tag_list(input: &str) -> Result<Vec<String>, TagValidationError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    input
        .split(',')
        .map(|raw| {
            let tag = raw.trim();
            validate_tag(tag)?;
            Ok(tag.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag_list() {
        assert_eq!(parse_tag_list("a,b").unwrap(), vec!["a", "b"]);
        assert_eq!(parse_tag_list(" a , b ").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(parse_tag_list("").unwrap().is_empty());
        assert!(parse_tag_list("  ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_empty_item() {
        assert_eq!(parse_tag_list("a,,b"), Err(TagValidationError::Empty));
    }

    #[test]
    fn test_parse_rejects_invalid_tag() {
        assert_eq!(
            parse_tag_list("ok,two words"),
            Err(TagValidationError::Whitespace)
        );
    }
}
