//! Content extraction from fetched HTML pages.
//!
//! Every multi-item extractor returns body lines with one blank line between
//! items, ready for [`crate::model::Section::set_body`].

use scraper::{ElementRef, Html, Selector};

fn select<'a>(doc: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    Selector::parse(css)
        .map(|selector| doc.select(&selector).collect())
        .unwrap_or_default()
}

/// Collapses whitespace runs to one space and trims.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn element_text(element: &ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

fn is_web_url(value: &str) -> bool {
    value.starts_with("https://") || value.starts_with("http://")
}

fn separated(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut lines = Vec::new();
    for item in items {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(item);
    }
    lines
}

pub fn title(doc: &Html) -> String {
    select(doc, "title")
        .first()
        .map(element_text)
        .unwrap_or_default()
}

/// Absolute images in the body, as Markdown image lines.
pub fn images(doc: &Html) -> Vec<String> {
    separated(
        select(doc, "body img")
            .iter()
            .filter_map(|img| img.value().attr("src"))
            .filter(|src| is_web_url(src))
            .map(|src| format!("![alt text]({} \"title\")", src)),
    )
}

/// Absolute links in the body, as Markdown links.
pub fn links(doc: &Html) -> Vec<String> {
    separated(select(doc, "body a").iter().filter_map(|a| {
        let href = a.value().attr("href")?;
        is_web_url(href).then(|| format!("[{}]({})", element_text(a), href))
    }))
}

/// Text of each non-empty `<p>`.
pub fn paragraphs(doc: &Html) -> Vec<String> {
    separated(
        select(doc, "p")
            .iter()
            .map(element_text)
            .filter(|text| !text.is_empty()),
    )
}

/// Every non-blank line of the body text.
pub fn text(doc: &Html) -> Vec<String> {
    let raw: String = select(doc, "body")
        .iter()
        .flat_map(|body| body.text())
        .collect();
    separated(
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html>
<head><title>  A   Page
Title </title></head>
<body>
  <p>First   paragraph
  text.</p>
  <p>   </p>
  <p>Second <a href="https://example.com/x">an   example</a></p>
  <a href="/relative">skip</a>
  <img src="https://example.com/a.png">
  <img src="local.png">
</body>
</html>"#;

    fn doc() -> Html {
        Html::parse_document(PAGE)
    }

    #[test]
    fn extracts_title() {
        assert_eq!(title(&doc()), "A Page Title");
        assert_eq!(title(&Html::parse_document("<p>no title</p>")), "");
    }

    #[test]
    fn extracts_absolute_images() {
        assert_eq!(
            images(&doc()),
            vec!["![alt text](https://example.com/a.png \"title\")"]
        );
    }

    #[test]
    fn extracts_absolute_links() {
        assert_eq!(links(&doc()), vec!["[an example](https://example.com/x)"]);
    }

    #[test]
    fn extracts_paragraphs_separated_by_blank_lines() {
        assert_eq!(
            paragraphs(&doc()),
            vec!["First paragraph text.", "", "Second an example"]
        );
    }

    #[test]
    fn extracts_text_lines() {
        let lines = text(&doc());
        assert_eq!(lines.first().map(String::as_str), Some("First   paragraph"));
        assert!(lines.iter().all(|l| l.is_empty() || !l.starts_with(' ')));
        assert!(lines.contains(&"skip".to_string()));
    }
}
