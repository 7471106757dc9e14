//! Line-oriented parser for webnote files.
//!
//! The scanner has three states:
//!
//! ```text
//! FileStart --header--> InHeader --blank--> InBody
//!                          ^                  |
//!                          +-----header-------+
//! ```
//!
//! A section header (`# note://…`, `# http://…`, `# https://…`) starts a new
//! section from any state. Trailing whitespace is stripped from every line
//! before it is looked at. When a section ends, exactly one trailing blank body
//! line is dropped, which is the separator the serializer puts between sections.

use std::path::Path;

use crate::error::{Result, WebnotesError};
use crate::model::{is_singleton, Document, Section, NOTE_SCHEME};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    FileStart,
    InHeader,
    InBody,
}

/// Parses `text` into a document bound to `path`. Errors carry the path and
/// the 1-based line number.
pub fn parse_document(path: impl AsRef<Path>, text: &str) -> Result<Document> {
    let path = path.as_ref();
    let mut doc = Document::new(path);
    let mut state = ParseState::FileStart;
    let err = |line: usize, message: String| WebnotesError::Parse {
        path: path.display().to_string(),
        line,
        message,
    };

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim_end();

        if let Some(section) = parse_header(line) {
            let section = section.map_err(|e| err(line_number, e.to_string()))?;
            trim_last_section(&mut doc);
            doc.push(section);
            state = ParseState::InHeader;
            continue;
        }

        match state {
            ParseState::FileStart => {
                return Err(err(
                    line_number,
                    "Unexpected start to web note file".to_string(),
                ));
            }
            ParseState::InHeader => {
                if line.is_empty() {
                    state = ParseState::InBody;
                    continue;
                }
                let (name, values) = parse_field_line(line)
                    .ok_or_else(|| err(line_number, "Invalid header line".to_string()))?;
                let Some(section) = doc.last_mut() else {
                    return Err(err(line_number, "Header without section".to_string()));
                };
                if section.has_field(name) {
                    return Err(err(
                        line_number,
                        format!("Duplicate field '{}'", name),
                    ));
                }
                section.set_field(name, values);
            }
            ParseState::InBody => {
                if let Some(section) = doc.last_mut() {
                    section.append_body(line);
                }
            }
        }
    }

    trim_last_section(&mut doc);
    Ok(doc)
}

/// `Some` when the line is a section header, holding the built section or the
/// construction error.
fn parse_header(line: &str) -> Option<Result<Section>> {
    if let Some(note) = line.strip_prefix("# ").and_then(|r| r.strip_prefix(NOTE_SCHEME)) {
        return Some(Section::note(note));
    }
    if line.starts_with("# http://") || line.starts_with("# https://") {
        return Some(Section::bookmark(&line[2..]));
    }
    None
}

fn parse_field_line(line: &str) -> Option<(&str, Vec<String>)> {
    let (name, rest) = line.split_once(": ")?;
    if name.is_empty() {
        return None;
    }
    let values: Vec<String> = if is_singleton(name) {
        vec![rest.to_string()]
    } else {
        rest.split(',')
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    };
    if values.is_empty() || values.iter().all(|v| v.is_empty()) {
        return None;
    }
    Some((name, values))
}

fn trim_last_section(doc: &mut Document) {
    if let Some(section) = doc.last_mut() {
        let body = section.body_mut();
        if body.last().is_some_and(|l| l.is_empty()) {
            body.pop();
        }
    }
}
