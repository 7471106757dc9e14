//! Markdown bodies to HTML.
//!
//! Links that point into another webnote (`notes/a.wn#Some_Note`) are
//! rewritten to `<prefix><dest>` so they can be served as collection pages.
//! External links and links to a whole file are left as they are.

use pulldown_cmark::{html, Event, Options, Parser, Tag};

pub const DEFAULT_LINK_PREFIX: &str = "/file/";

/// A relative link to a section of another webnote.
pub fn is_webnote_link(dest: &str) -> bool {
    if dest.starts_with("http://") || dest.starts_with("https://") {
        return false;
    }
    if dest.ends_with(".wn") {
        return false;
    }
    dest.contains(".wn#")
}

pub fn markdown_to_html(markdown: &str, link_prefix: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES;
    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if is_webnote_link(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: format!("{}{}", link_prefix, dest_url).into(),
            title,
            id,
        }),
        other => other,
    });

    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

/// Escapes text for HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_webnote_link() {
        assert!(is_webnote_link("notes/a.wn#My_Note"));
        assert!(!is_webnote_link("notes/a.wn"));
        assert!(!is_webnote_link("https://example.com/a.wn#x"));
        assert!(!is_webnote_link("other.md#x"));
    }

    #[test]
    fn test_rewrites_webnote_links() {
        let html = markdown_to_html("see [this](a.wn#n1)", DEFAULT_LINK_PREFIX);
        assert!(html.contains(r#"<a href="/file/a.wn#n1">this</a>"#));
    }

    #[test]
    fn test_keeps_external_links() {
        let html = markdown_to_html("[x](https://example.com)", "/file/");
        assert!(html.contains(r#"<a href="https://example.com">x</a>"#));
    }

    #[test]
    fn test_renders_markdown() {
        let html = markdown_to_html("# Title\n\n*em*", "");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>em</em>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}
