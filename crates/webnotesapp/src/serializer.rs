//! Canonical text rendering of sections and documents.
//!
//! Layout per section:
//!
//! ```text
//! # note://<note> | # <url>
//! <priority fields, in configured order>
//! <remaining fields, in storage order>
//!
//! <body, blank runs collapsed, no leading or trailing blank>
//! ```
//!
//! Sections are joined by one blank line and the output ends with a newline.
//! Rendering never mutates the section; tags are written from a sorted copy.

use crate::model::{Document, Field, Identity, Section, NOTE_SCHEME, TAGS};

pub const DEFAULT_FIELD_ORDER: &[&str] = &[
    "title",
    "description",
    "author",
    "date",
    "tags",
    "status",
    "error",
];

#[derive(Debug, Clone)]
pub struct Serializer {
    field_order: Vec<String>,
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new(DEFAULT_FIELD_ORDER.iter().map(|s| s.to_string()).collect())
    }
}

impl Serializer {
    pub fn new(field_order: Vec<String>) -> Self {
        Self { field_order }
    }

    pub fn field_order(&self) -> &[String] {
        &self.field_order
    }

    pub fn render_section(&self, section: &Section) -> String {
        let mut lines: Vec<String> = Vec::new();
        lines.push(match section.identity() {
            Identity::Note(note) => format!("# {}{}", NOTE_SCHEME, note),
            Identity::Bookmark(url) => format!("# {}", url),
        });

        for name in &self.field_order {
            if let Some(field) = section.field(name) {
                push_field(&mut lines, field);
            }
        }
        for field in section.fields() {
            if !self.field_order.contains(&field.name) {
                push_field(&mut lines, field);
            }
        }

        let mut in_body = false;
        for raw in section.body() {
            let line = raw.trim_end();
            if line.is_empty() && (!in_body || lines.last().is_some_and(|l| l.is_empty())) {
                continue;
            }
            if !in_body {
                lines.push(String::new());
                in_body = true;
            }
            lines.push(line.to_string());
        }
        if lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// The whole document; empty documents render to the empty string.
    pub fn render_document(&self, doc: &Document) -> String {
        doc.sections()
            .iter()
            .map(|s| self.render_section(s))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn push_field(lines: &mut Vec<String>, field: &Field) {
    if field.values.is_empty() {
        return;
    }
    let values = if field.name == TAGS {
        let mut sorted = field.values.clone();
        sorted.sort();
        sorted.join(",")
    } else {
        field.values.join(",")
    };
    lines.push(format!("{}: {}", field.name, values));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;

    fn lines(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn renders_priority_fields_first() {
        let mut section = Section::bookmark("https://example.com").unwrap();
        section.set_field("links", lines(&["x", "y"]));
        section.set_field_value("error", "boom");
        section.set_field_value("title", "T");
        section.add_tags(&lines(&["b", "a"]));

        let out = Serializer::default().render_section(&section);
        assert_eq!(
            out,
            "# https://example.com\ntitle: T\ntags: a,b\nerror: boom\nlinks: x,y\n"
        );
    }

    #[test]
    fn custom_field_order() {
        let mut section = Section::note("n").unwrap();
        section.set_field_value("title", "T");
        section.set_field_value("author", "A");
        let serializer = Serializer::new(lines(&["author"]));
        assert_eq!(
            serializer.render_section(&section),
            "# note://n\nauthor: A\ntitle: T\n"
        );
    }

    #[test]
    fn body_blank_runs_are_collapsed() {
        let mut section = Section::note("n").unwrap();
        section.set_body(lines(&["", "  ", "one", "", "", "two  ", ""]));
        assert_eq!(
            Serializer::default().render_section(&section),
            "# note://n\n\none\n\ntwo\n"
        );
    }

    #[test]
    fn blank_only_body_is_omitted() {
        let mut section = Section::note("n").unwrap();
        section.set_body(lines(&["", " "]));
        assert_eq!(Serializer::default().render_section(&section), "# note://n\n");
    }

    #[test]
    fn empty_fields_are_skipped() {
        let mut section = Section::note("n").unwrap();
        section.set_field("links", Vec::new());
        assert_eq!(Serializer::default().render_section(&section), "# note://n\n");
    }

    #[test]
    fn sections_joined_by_blank_line() {
        let mut doc = Document::new("a.wn");
        doc.push(Section::note("a").unwrap());
        doc.push(Section::note("b").unwrap());
        assert_eq!(
            Serializer::default().render_document(&doc),
            "# note://a\n\n# note://b\n"
        );
        assert_eq!(Serializer::default().render_document(&Document::new("e.wn")), "");
    }

    #[test]
    fn round_trip_preserves_document() {
        let text = "# note://first\ntitle: First\ntags: a,b\nlinks: x,y\n\nsome *markdown*\n\nmore\n\n# https://example.com/page\ndescription: A page, with commas\nstatus: 404 Not Found\n";
        let doc = parse_document("rt.wn", text).unwrap();
        let serializer = Serializer::default();
        let rendered = serializer.render_document(&doc);
        assert_eq!(rendered, text);
        let reparsed = parse_document("rt.wn", &rendered).unwrap();
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn parsed_example_renders_canonically() {
        let text = "# note://My First Note\ntitle: Hello World\ntags: b,a,a\n\nSome body text.\n";
        let doc = parse_document("first.wn", text).unwrap();
        let section = &doc.sections()[0];
        assert_eq!(doc.sections().len(), 1);
        assert_eq!(section.note_string(), Some("My_First_Note"));
        assert_eq!(section.field_value("title"), Some("Hello World"));
        assert_eq!(section.tags(), &["a".to_string(), "b".to_string()][..]);
        assert_eq!(section.body(), &["Some body text.".to_string()][..]);
        assert_eq!(
            Serializer::default().render_document(&doc),
            "# note://My_First_Note\ntitle: Hello World\ntags: a,b\n\nSome body text.\n"
        );
    }

    #[test]
    fn example_scenario_canonical_tags() {
        let mut doc = Document::new("ex.wn");
        let mut section = Section::note("note 1").unwrap();
        section.set_field_value("title", "Hello");
        section.add_tag("b");
        section.add_tag("a");
        section.add_tag("b");
        doc.push(section);
        assert_eq!(
            Serializer::default().render_document(&doc),
            "# note://note_1\ntitle: Hello\ntags: a,b\n"
        );
    }
}
