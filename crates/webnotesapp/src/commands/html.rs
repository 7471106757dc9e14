//! Renders matched sections as a single HTML page, one block per file.
//!
//! Each section gets an anchor: the note-string for notes, the MD5 of the
//! url for bookmarks. Tags link to their index page
//! (`/tags/<md5(tag)>`), and bodies go through
//! [`crate::markdown::markdown_to_html`].

use crate::commands::helpers::{collect_matches, Selection};
use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::content_hash;
use crate::markdown::{escape_html, markdown_to_html};
use crate::model::{Identity, Section, TAGS};
use crate::store::{DocumentStore, StorageBackend};
use std::path::Path;

pub fn run<B: StorageBackend>(
    store: &DocumentStore<B>,
    selection: &Selection,
    link_prefix: &str,
) -> Result<CmdResult> {
    let matches = collect_matches(store, selection)?;

    let mut page = String::from("<html><head><meta charset=\"utf-8\"></head><body>\n");
    let mut current: Option<&Path> = None;
    for (path, section) in &matches {
        if current != Some(path.as_path()) {
            let shown = escape_html(&path.display().to_string());
            page.push_str(&format!(
                "<h2><a href=\"{}{}\">{}</a></h2>\n",
                link_prefix, shown, shown
            ));
            current = Some(path.as_path());
        }
        page.push_str("<hr>\n");
        render_section(&mut page, section, link_prefix);
    }
    page.push_str("</body></html>\n");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "Rendered {} section{}",
        matches.len(),
        plural(matches.len())
    )));
    result.html = Some(page);
    Ok(result)
}

fn render_section(page: &mut String, section: &Section, link_prefix: &str) {
    match section.identity() {
        Identity::Note(note) => {
            let note = escape_html(note);
            page.push_str(&format!(
                "<p><a id=\"{0}\" href=\"#{0}\">#</a> note://{0}</p>\n",
                note
            ));
        }
        Identity::Bookmark(url) => {
            let anchor = content_hash(url);
            let url = escape_html(url);
            page.push_str(&format!(
                "<p><a id=\"{0}\" href=\"#{0}\">#</a> <a href=\"{1}\">{1}</a></p>\n",
                anchor, url
            ));
        }
    }

    for field in section.fields() {
        if field.name == TAGS {
            let links: Vec<String> = field
                .values
                .iter()
                .map(|tag| format!("<a href=\"/tags/{}\">{}</a>", content_hash(tag), escape_html(tag)))
                .collect();
            page.push_str(&format!("<p>tags: {}</p>\n", links.join(", ")));
        } else {
            page.push_str(&format!(
                "<p>{}: {}</p>\n",
                escape_html(&field.name),
                escape_html(&field.values.join(", "))
            ));
        }
    }

    if !section.body().is_empty() {
        page.push_str(&markdown_to_html(&section.body().join("\n"), link_prefix));
    }
}
