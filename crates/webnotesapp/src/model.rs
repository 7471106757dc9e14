//! # Domain Model: Fields, Sections and Documents
//!
//! A webnote file is a [`Document`]: an ordered list of [`Section`]s bound to a
//! path. Each section is either a note or a bookmark, carries a set of named
//! [`Field`]s and a free-text body.
//!
//! ```text
//! # https://example.com/article     <-- identity (bookmark)
//! title: An Article                 <-- singleton field
//! tags: reading,rust                <-- multi-valued field
//!                                   <-- blank separator
//! Body text, usually Markdown.      <-- body lines
//! ```
//!
//! ## Identity
//!
//! A section is identified by exactly one of:
//! - **Note**: a note-string, normalized so that surrounding whitespace is trimmed
//!   and internal whitespace runs become a single `_` (`My First Note` → `My_First_Note`).
//! - **Bookmark**: a URL including its `http://` or `https://` scheme.
//!
//! [`Identity`] is an enum, so a section with neither or both cannot exist once
//! built. [`Section::new`] is the checked constructor for callers that hold the
//! two optional inputs separately (CLI flags).
//!
//! ## Fields
//!
//! Field names are unique within a section. Some names are *singletons*
//! ([`SINGLETON_FIELDS`]): at most one value is meaningful and merging never
//! overwrites them. Everything else is multi-valued. The `tags` field is kept
//! sorted and de-duplicated by every mutation path, and is deleted outright
//! when its last tag goes away.
//!
//! `status` and `error` are mutually exclusive: a section either records the
//! last HTTP status it got, or the error that prevented getting one.

use serde::Serialize;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::error::{Result, WebnotesError};

pub const NOTE_SCHEME: &str = "note://";

pub const AUTHOR: &str = "author";
pub const DATE: &str = "date";
pub const DESCRIPTION: &str = "description";
pub const ERROR: &str = "error";
pub const STATUS: &str = "status";
pub const TAGS: &str = "tags";
pub const TITLE: &str = "title";

/// Fields that hold at most one value.
pub const SINGLETON_FIELDS: &[&str] = &[AUTHOR, DATE, DESCRIPTION, ERROR, STATUS, TITLE];

pub fn is_singleton(name: &str) -> bool {
    SINGLETON_FIELDS.contains(&name)
}

/// Trims and replaces each internal whitespace run with a single underscore.
pub fn normalize_note(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Collapses whitespace so a fetch message fits on one header line.
fn header_value(text: String) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        "unknown".to_string()
    } else {
        collapsed
    }
}

/// Sorts and de-duplicates a tag list in place.
pub fn normalize_tags(tags: &mut Vec<String>) {
    tags.sort();
    tags.dedup();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub values: Vec<String>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn is_singleton(&self) -> bool {
        is_singleton(&self.name)
    }

    /// Merges `other`'s values into this field, skipping values already present.
    /// Singleton fields are never touched by a merge.
    pub fn add(&mut self, other: &Field) {
        if self.is_singleton() {
            return;
        }
        for value in &other.values {
            if !self.values.contains(value) {
                self.values.push(value.clone());
            }
        }
    }
}

/// What a section is about. Notes order before bookmarks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Identity {
    Note(String),
    Bookmark(String),
}

impl Identity {
    pub fn as_str(&self) -> &str {
        match self {
            Identity::Note(note) => note,
            Identity::Bookmark(url) => url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    identity: Identity,
    fields: Vec<Field>,
    body: Vec<String>,
}

impl Section {
    /// Builds a section from a note and/or url where empty strings count as absent.
    /// Exactly one of the two must be given.
    pub fn new(note: Option<&str>, url: Option<&str>) -> Result<Self> {
        let note = note.filter(|n| !n.is_empty());
        let url = url.filter(|u| !u.is_empty());
        match (note, url) {
            (Some(note), None) => Self::note(note),
            (None, Some(url)) => Self::bookmark(url),
            (None, None) => Err(WebnotesError::InvalidSection(
                "note or url must be given".to_string(),
            )),
            (Some(_), Some(_)) => Err(WebnotesError::InvalidSection(
                "only a note or a url can be given".to_string(),
            )),
        }
    }

    /// A note section. The note-string is normalized and must not end up empty.
    pub fn note(text: &str) -> Result<Self> {
        let note = normalize_note(text);
        if note.is_empty() {
            return Err(WebnotesError::InvalidSection(
                "note string is empty".to_string(),
            ));
        }
        Ok(Self::from_identity(Identity::Note(note)))
    }

    /// A bookmark section. Only `http://` and `https://` urls are representable in a file.
    pub fn bookmark(url: &str) -> Result<Self> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(WebnotesError::InvalidSection(format!(
                "url must start with http:// or https://: {}",
                url
            )));
        }
        Ok(Self::from_identity(Identity::Bookmark(url.to_string())))
    }

    fn from_identity(identity: Identity) -> Self {
        Self {
            identity,
            fields: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The note-string or the url.
    pub fn id(&self) -> &str {
        self.identity.as_str()
    }

    pub fn note_string(&self) -> Option<&str> {
        match &self.identity {
            Identity::Note(note) => Some(note),
            Identity::Bookmark(_) => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match &self.identity {
            Identity::Note(_) => None,
            Identity::Bookmark(url) => Some(url),
        }
    }

    pub fn is_note(&self) -> bool {
        matches!(self.identity, Identity::Note(_))
    }

    pub fn is_bookmark(&self) -> bool {
        matches!(self.identity, Identity::Bookmark(_))
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn body(&self) -> &[String] {
        &self.body
    }

    // --- Field access ---

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// The field's value, only when the field holds exactly one value.
    pub fn field_value(&self, name: &str) -> Option<&str> {
        match self.field(name) {
            Some(field) if field.values.len() == 1 => Some(field.values[0].as_str()),
            _ => None,
        }
    }

    pub fn field_values(&self, name: &str) -> Option<&[String]> {
        self.field(name).map(|f| f.values.as_slice())
    }

    /// True if the scalar value of the field equals `value`.
    pub fn field_equals(&self, name: &str, value: &str) -> bool {
        self.field_value(name) == Some(value)
    }

    /// True if the field holds at least one of `values`. An empty request is vacuously true.
    pub fn field_has_any(&self, name: &str, values: &[String]) -> bool {
        if values.is_empty() {
            return true;
        }
        match self.field_values(name) {
            Some(present) => values.iter().any(|v| present.contains(v)),
            None => false,
        }
    }

    /// True if the field holds every one of `values`. An empty request is vacuously true.
    pub fn field_has_all(&self, name: &str, values: &[String]) -> bool {
        if values.is_empty() {
            return true;
        }
        match self.field_values(name) {
            Some(present) => values.iter().all(|v| present.contains(v)),
            None => false,
        }
    }

    // --- Field mutation ---

    /// Replaces the field's values, creating the field if absent.
    pub fn set_field(&mut self, name: &str, values: Vec<String>) {
        match self.field_mut(name) {
            Some(field) => field.values = values,
            None => self.fields.push(Field::with_values(name, values)),
        }
        if name == TAGS {
            self.normalize_tags();
        }
    }

    pub fn set_field_value(&mut self, name: &str, value: impl Into<String>) {
        self.set_field(name, vec![value.into()]);
    }

    /// Sets the field only when it is absent.
    pub fn fill_field(&mut self, name: &str, value: impl Into<String>) {
        if !self.has_field(name) {
            self.set_field_value(name, value);
        }
    }

    pub fn delete_field(&mut self, name: &str) {
        self.fields.retain(|f| f.name != name);
    }

    pub fn delete_fields(&mut self, names: &[&str]) {
        for name in names {
            self.delete_field(name);
        }
    }

    pub fn delete_all_fields(&mut self) {
        self.fields.clear();
    }

    // --- Tags ---

    pub fn tags(&self) -> &[String] {
        self.field_values(TAGS).unwrap_or(&[])
    }

    pub fn add_tag(&mut self, tag: &str) {
        match self.field_mut(TAGS) {
            Some(field) => field.values.push(tag.to_string()),
            None => self.fields.push(Field::with_values(TAGS, vec![tag.to_string()])),
        }
        self.normalize_tags();
    }

    pub fn add_tags(&mut self, tags: &[String]) {
        for tag in tags {
            self.add_tag(tag);
        }
    }

    /// Removes the tag; the tags field is dropped once empty.
    pub fn delete_tag(&mut self, tag: &str) {
        let Some(field) = self.field_mut(TAGS) else {
            return;
        };
        field.values.retain(|t| t != tag);
        if field.values.is_empty() {
            self.delete_field(TAGS);
        }
    }

    pub fn delete_tags(&mut self, tags: &[String]) {
        for tag in tags {
            self.delete_tag(tag);
        }
    }

    /// Replaces all tags. An empty list deletes the field.
    pub fn set_tags(&mut self, tags: &[String]) {
        if tags.is_empty() {
            self.delete_field(TAGS);
        } else {
            self.set_field(TAGS, tags.to_vec());
        }
    }

    fn normalize_tags(&mut self) {
        if let Some(field) = self.field_mut(TAGS) {
            normalize_tags(&mut field.values);
        }
    }

    // --- Status and error ---

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.delete_field(ERROR);
        self.set_field_value(STATUS, header_value(status.into()));
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.delete_field(STATUS);
        self.set_field_value(ERROR, header_value(error.into()));
    }

    /// Forgets both status and error, after a successful check.
    pub fn clear_status(&mut self) {
        self.delete_fields(&[ERROR, STATUS]);
    }

    // --- Date ---

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.set_field_value(DATE, date);
    }

    pub fn fill_date(&mut self, date: impl Into<String>) {
        self.fill_field(DATE, date);
    }

    // --- Body ---

    pub fn set_body(&mut self, lines: Vec<String>) {
        self.body = lines;
    }

    /// Sets the body only when the section has none.
    pub fn fill_body(&mut self, lines: Vec<String>) {
        if self.body.is_empty() {
            self.body = lines;
        }
    }

    pub fn append_body(&mut self, line: impl Into<String>) {
        self.body.push(line.into());
    }

    pub fn delete_body(&mut self) {
        self.body.clear();
    }

    pub fn delete_all(&mut self) {
        self.delete_all_fields();
        self.delete_body();
    }

    pub(crate) fn body_mut(&mut self) -> &mut Vec<String> {
        &mut self.body
    }

    // --- Comparison ---

    /// Same note-string, or same url.
    pub fn matches_identity(&self, other: &Section) -> bool {
        self.identity == other.identity
    }

    /// Host of the url as written, including the port when one is given.
    /// Case and default ports are kept; userinfo is dropped.
    pub fn host(&self) -> Option<String> {
        let url = self.url()?;
        url::Url::parse(url).ok()?;
        let (_, rest) = url.split_once("://")?;
        let authority = rest.split(['/', '?', '#']).next()?;
        let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
        (!host.is_empty()).then(|| host.to_string())
    }

    /// An empty host matches every bookmark. Notes never match.
    pub fn equals_host(&self, host: &str) -> bool {
        if !self.is_bookmark() {
            return false;
        }
        if host.is_empty() {
            return true;
        }
        self.host().as_deref() == Some(host)
    }

    /// Merges `other` into this section without overwriting anything:
    /// fields merge per [`Field::add`], missing fields are copied, and the
    /// bodies are concatenated with one blank line in between.
    pub fn add(&mut self, other: &Section) {
        for incoming in &other.fields {
            match self.field_mut(&incoming.name) {
                Some(existing) => existing.add(incoming),
                None => self.fields.push(incoming.clone()),
            }
        }
        self.normalize_tags();
        if !other.body.is_empty() {
            if !self.body.is_empty() {
                self.body.push(String::new());
            }
            self.body.extend(other.body.iter().cloned());
        }
    }
}

/// Ordering by identity: notes first, then lexicographic.
pub fn compare_sections(a: &Section, b: &Section) -> Ordering {
    a.identity.cmp(&b.identity)
}

/// Equivalence used by the round-trip contract: same identity, same body,
/// and the same non-empty fields with the same values in any order.
impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        if self.identity != other.identity || self.body != other.body {
            return false;
        }
        let canonical = |section: &Section| {
            let mut fields: Vec<(String, Vec<String>)> = section
                .fields
                .iter()
                .filter(|f| !f.values.is_empty())
                .map(|f| {
                    let mut values = f.values.clone();
                    values.sort();
                    (f.name.clone(), values)
                })
                .collect();
            fields.sort();
            fields
        };
        canonical(self) == canonical(other)
    }
}

impl Eq for Section {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    sections: Vec<Section>,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sections: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn sections_mut(&mut self) -> &mut [Section] {
        &mut self.sections
    }

    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn last_mut(&mut self) -> Option<&mut Section> {
        self.sections.last_mut()
    }

    /// Removes the sections at `indexes` and returns them in document order.
    /// Out-of-range indexes are ignored.
    pub fn remove_sections(&mut self, indexes: &[usize]) -> Vec<Section> {
        let mut sorted: Vec<usize> = indexes
            .iter()
            .copied()
            .filter(|&i| i < self.sections.len())
            .collect();
        sorted.sort_unstable();
        sorted.dedup();
        let mut removed: Vec<Section> = sorted
            .iter()
            .rev()
            .map(|&i| self.sections.remove(i))
            .collect();
        removed.reverse();
        removed
    }

    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }
}
