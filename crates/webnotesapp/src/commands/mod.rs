//! # Command Layer
//!
//! This module contains the **core logic** of webnotes. Each verb lives in its
//! own submodule and implements plain functions over a [`DocumentStore`].
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Select documents ([`helpers::FileSelector`]) and sections ([`crate::matcher::Matcher`])
//! - Mutate sections through the [`crate::model::Section`] contract
//! - Save only the documents in which something matched
//! - Return structured [`CmdResult`] values with messages
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: No stdout, stderr, colors or exit codes
//! - **Argument parsing**: That's the CLI layer's job
//!
//! ## Testing Strategy
//!
//! Command tests use [`crate::store::MemBackend`] and a stub fetcher, so no test
//! here touches the filesystem or the network.
//!
//! ## Command Modules
//!
//! - [`add`]: Append a new section to a file
//! - [`append`]: Merge values into matched sections
//! - [`clear`]: Delete fields or bodies
//! - [`transfer`]: Copy or move sections to another file
//! - [`delete`]: Remove sections
//! - [`duplicates`]: Report ids present in several files
//! - [`update`]: `set` and `fill` values
//! - [`format`]: Rewrite files canonically
//! - [`head`]: Check bookmarks are alive
//! - [`index`]: Rebuild the secondary index
//! - [`matches`]: List matched sections
//! - [`tagging`]: Add and remove tags
//! - [`html`]: Render matched sections as an HTML page
//! - [`helpers`]: Shared selection utilities

use crate::enrich::Enrichment;
use crate::error::{Result, WebnotesError};
use crate::index::IndexSummary;
use crate::model::{Section, TAGS};
use serde::Serialize;
use std::path::PathBuf;

pub mod add;
pub mod append;
pub mod clear;
pub mod delete;
pub mod duplicates;
pub mod format;
pub mod head;
pub mod helpers;
pub mod html;
pub mod index;
pub mod matches;
pub mod tagging;
pub mod transfer;
pub mod update;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A section together with the file it came from.
#[derive(Debug, Clone, Serialize)]
pub struct ListedSection {
    pub path: PathBuf,
    pub section: Section,
}

/// An id found in more than one selected file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Duplicate {
    pub id: String,
    pub paths: Vec<PathBuf>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_sections: Vec<ListedSection>,
    pub duplicates: Vec<Duplicate>,
    pub index: Option<IndexSummary>,
    pub html: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_sections(mut self, sections: Vec<ListedSection>) -> Self {
        self.listed_sections = sections;
        self
    }
}

/// Values given on the command line for add, append, set and fill.
#[derive(Debug, Clone, Default)]
pub struct SectionValues {
    /// Scalar fields, applied in order.
    pub fields: Vec<(String, String)>,
    pub tags: Vec<String>,
    pub body: Option<String>,
    pub enrichment: Enrichment,
}

impl SectionValues {
    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
            && self.tags.is_empty()
            && self.body.is_none()
            && self.enrichment.is_empty()
    }

    /// Field and tag values must be non-empty single lines, or the written
    /// header would not parse back.
    pub fn validate(&self) -> Result<()> {
        let fields = self.fields.iter().map(|(name, value)| (name.as_str(), value));
        let tags = self.tags.iter().map(|tag| (TAGS, tag));
        for (name, value) in fields.chain(tags) {
            if value.trim().is_empty() {
                return Err(WebnotesError::Api(format!("Empty value for {}", name)));
            }
            if value.contains(['\n', '\r']) {
                return Err(WebnotesError::Api(format!(
                    "Value for {} must be a single line",
                    name
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TITLE;

    #[test]
    fn validate_accepts_single_line_values() {
        let values = SectionValues {
            tags: vec!["rust".into()],
            body: Some("two\nlines".into()),
            ..Default::default()
        }
        .with_field(TITLE, "A title");
        assert!(values.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_and_multiline_values() {
        assert!(SectionValues::default()
            .with_field(TITLE, "")
            .validate()
            .is_err());
        assert!(SectionValues::default()
            .with_field(TITLE, "a\nb")
            .validate()
            .is_err());
        assert!(SectionValues::default()
            .with_field(TITLE, "a\rb")
            .validate()
            .is_err());
        let tags = SectionValues {
            tags: vec![" ".into()],
            ..Default::default()
        };
        assert!(tags.validate().is_err());
    }
}
