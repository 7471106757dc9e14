use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebnotesError {
    /// A section was built with neither or both of note and url.
    #[error("Invalid section: {0}")]
    InvalidSection(String),

    #[error("{path}: {message} on line {line}")]
    Parse {
        path: String,
        line: usize,
        message: String,
    },

    #[error("Invalid selection: {0}")]
    Selection(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid tag: {0}")]
    Tag(#[from] crate::tags::TagValidationError),

    #[error("Found duplicate note section: {0}")]
    DuplicateNote(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, WebnotesError>;
