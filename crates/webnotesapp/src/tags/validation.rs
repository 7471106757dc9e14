//! Tag validation for webnotes.
//!
//! Tags are stored comma-separated on a single `tags:` header line, so a tag
//! must survive that encoding:
//! - Not empty
//! - No commas
//! - No whitespace
//! - No leading `#`

/// Validates a tag against the grammar of the `tags:` header.
///
/// # Examples
/// ```
/// use webnotesapp::tags::validation::validate_tag;
///
/// assert!(validate_tag("rust").is_ok());
/// assert!(validate_tag("to-read").is_ok());
/// assert!(validate_tag("c++").is_ok());
///
/// assert!(validate_tag("").is_err());
/// assert!(validate_tag("a,b").is_err());
/// assert!(validate_tag("two words").is_err());
/// assert!(validate_tag("#rust").is_err());
/// ```
pub fn validate_tag(tag: &str) -> Result<(), TagValidationError> {
    if tag.is_empty() {
        return Err(TagValidationError::Empty);
    }
    if tag.starts_with('#') {
        return Err(TagValidationError::HashPrefix);
    }
    for ch in tag.chars() {
        if ch == ',' {
            return Err(TagValidationError::Comma);
        }
        if ch.is_whitespace() {
            return Err(TagValidationError::Whitespace);
        }
    }
    Ok(())
}

/// Error type for tag validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValidationError {
    /// Tag is empty
    Empty,
    /// Tag contains a comma, the list separator
    Comma,
    /// Tag contains whitespace
    Whitespace,
    /// Tag starts with `#`
    HashPrefix,
}

impl std::fmt::Display for TagValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagValidationError::Empty => write!(f, "tag cannot be empty"),
            TagValidationError::Comma => write!(f, "tag cannot contain a comma"),
            TagValidationError::Whitespace => write!(f, "tag cannot contain whitespace"),
            TagValidationError::HashPrefix => write!(f, "tag cannot start with '#'"),
        }
    }
}

impl std::error::Error for TagValidationError {}
