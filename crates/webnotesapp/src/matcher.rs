//! # Section Matching
//!
//! Every verb selects the sections it operates on with a [`Matcher`]: a
//! conjunction of [`Criterion`]s evaluated against one section at a time.
//! No criteria at all selects everything.
//!
//! Criteria come in from the outside as a [`SelectionCriteria`] (the shape
//! the CLI flags have), and [`Matcher::build`] validates them:
//!
//! - `notes_only` and `bookmarks_only` together are rejected.
//! - An equality test and a pattern on the same [`Dimension`] are rejected.
//! - Patterns must compile as regular expressions.
//!
//! ## Dimensions
//!
//! | Dimension     | Equality                                 | Pattern                     |
//! |---------------|------------------------------------------|-----------------------------|
//! | field `name`  | the field has exactly that single value  | the single value matches    |
//! | `body`        | the body is exactly one equal line       | any body line matches       |
//! | `host`        | [`Section::equals_host`] (`""` = any)    | the host matches            |
//! | `note`        | the normalized note-string is equal      | the note-string matches     |
//! | `url`         | the url is equal                         | the url matches             |
//!
//! Dimensions a section does not have (a note's host, a bookmark's note)
//! never match. Tags are not a dimension; they are tested by
//! `HasAnyTag`/`HasAllTags`.

use regex::Regex;
use std::str::FromStr;

use crate::error::{Result, WebnotesError};
use crate::model::{normalize_note, Section, TAGS};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dimension {
    Field(String),
    Body,
    Host,
    Note,
    Url,
}

impl FromStr for Dimension {
    type Err = WebnotesError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Err(WebnotesError::Selection("empty dimension name".to_string())),
            "body" => Ok(Dimension::Body),
            "host" => Ok(Dimension::Host),
            "note" => Ok(Dimension::Note),
            "url" => Ok(Dimension::Url),
            TAGS => Err(WebnotesError::Selection(
                "tags are matched with --any-tag and --all-tags".to_string(),
            )),
            name => Ok(Dimension::Field(name.to_string())),
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Field(name) => write!(f, "{}", name),
            Dimension::Body => write!(f, "body"),
            Dimension::Host => write!(f, "host"),
            Dimension::Note => write!(f, "note"),
            Dimension::Url => write!(f, "url"),
        }
    }
}

/// Splits `DIM=VALUE`. The value may be empty and may itself contain `=`.
pub fn parse_assignment(input: &str) -> Result<(Dimension, String)> {
    let (dim, value) = input.split_once('=').ok_or_else(|| {
        WebnotesError::Selection(format!("expected DIMENSION=VALUE, got '{}'", input))
    })?;
    Ok((dim.parse()?, value.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Note,
    Bookmark,
}

#[derive(Debug, Clone)]
pub enum Criterion {
    Kind(SectionKind),
    Equals(Dimension, String),
    Pattern(Dimension, Regex),
    HasAnyTag(Vec<String>),
    HasAllTags(Vec<String>),
}

impl Criterion {
    pub fn matches(&self, section: &Section) -> bool {
        match self {
            Criterion::Kind(SectionKind::Note) => section.is_note(),
            Criterion::Kind(SectionKind::Bookmark) => section.is_bookmark(),
            Criterion::Equals(dim, value) => equals(section, dim, value),
            Criterion::Pattern(dim, re) => pattern(section, dim, re),
            Criterion::HasAnyTag(tags) => section.field_has_any(TAGS, tags),
            Criterion::HasAllTags(tags) => section.field_has_all(TAGS, tags),
        }
    }
}

fn equals(section: &Section, dim: &Dimension, value: &str) -> bool {
    match dim {
        Dimension::Field(name) => section.field_equals(name, value),
        Dimension::Body => section.body().len() == 1 && section.body()[0] == value,
        Dimension::Host => section.equals_host(value),
        Dimension::Note => section.note_string() == Some(normalize_note(value).as_str()),
        Dimension::Url => section.url() == Some(value),
    }
}

fn pattern(section: &Section, dim: &Dimension, re: &Regex) -> bool {
    match dim {
        Dimension::Field(name) => section.field_value(name).is_some_and(|v| re.is_match(v)),
        Dimension::Body => section.body().iter().any(|line| re.is_match(line)),
        Dimension::Host => section.host().is_some_and(|h| re.is_match(&h)),
        Dimension::Note => section.note_string().is_some_and(|n| re.is_match(n)),
        Dimension::Url => section.url().is_some_and(|u| re.is_match(u)),
    }
}

/// Raw selection input, before validation.
#[derive(Debug, Clone, Default)]
pub struct SelectionCriteria {
    pub notes_only: bool,
    pub bookmarks_only: bool,
    pub equals: Vec<(Dimension, String)>,
    pub patterns: Vec<(Dimension, String)>,
    pub any_tags: Vec<String>,
    pub all_tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Matcher {
    criteria: Vec<Criterion>,
}

impl Matcher {
    /// Matches every section.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn build(input: &SelectionCriteria) -> Result<Self> {
        let mut criteria = Vec::new();

        match (input.notes_only, input.bookmarks_only) {
            (true, true) => {
                return Err(WebnotesError::Selection(
                    "only one of --notes and --bookmarks can be specified".to_string(),
                ))
            }
            (true, false) => criteria.push(Criterion::Kind(SectionKind::Note)),
            (false, true) => criteria.push(Criterion::Kind(SectionKind::Bookmark)),
            (false, false) => {}
        }

        for (dim, _) in &input.equals {
            if input.patterns.iter().any(|(d, _)| d == dim) {
                return Err(WebnotesError::Selection(format!(
                    "only one of an equality and a pattern can be given for '{}'",
                    dim
                )));
            }
        }

        for (dim, value) in &input.equals {
            criteria.push(Criterion::Equals(dim.clone(), value.clone()));
        }
        for (dim, source) in &input.patterns {
            criteria.push(Criterion::Pattern(dim.clone(), Regex::new(source)?));
        }
        if !input.any_tags.is_empty() {
            criteria.push(Criterion::HasAnyTag(input.any_tags.clone()));
        }
        if !input.all_tags.is_empty() {
            criteria.push(Criterion::HasAllTags(input.all_tags.clone()));
        }

        Ok(Self { criteria })
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn matches(&self, section: &Section) -> bool {
        self.criteria.iter().all(|c| c.matches(section))
    }
}
