//! # Enrichment
//!
//! Bookmarks can be enriched from the page they point to:
//!
//! - [`fetch`]: the [`Fetcher`] trait with the reqwest-backed [`HttpFetcher`],
//!   and the rules for recording an outcome on a section (`status` for an
//!   unexpected HTTP status, `error` when no status was received).
//! - [`extract`]: title, images, links, paragraphs and text from the HTML.
//!
//! A failed fetch is recorded on the section and never aborts the verb that
//! asked for it; the remaining sections are still processed.

pub mod extract;
pub mod fetch;

use scraper::Html;
use serde::Serialize;
use std::str::FromStr;

use crate::error::WebnotesError;
use crate::model::{Section, TITLE};

pub use fetch::{record_get, record_head, FetchOutcome, Fetcher, HttpFetcher};

/// Which page content becomes the section body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Capture {
    Images,
    Links,
    Paragraphs,
    Text,
}

impl Capture {
    pub fn extract(&self, doc: &Html) -> Vec<String> {
        match self {
            Capture::Images => extract::images(doc),
            Capture::Links => extract::links(doc),
            Capture::Paragraphs => extract::paragraphs(doc),
            Capture::Text => extract::text(doc),
        }
    }
}

impl FromStr for Capture {
    type Err = WebnotesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "images" => Ok(Capture::Images),
            "links" => Ok(Capture::Links),
            "p" | "paragraphs" => Ok(Capture::Paragraphs),
            "text" => Ok(Capture::Text),
            other => Err(WebnotesError::Api(format!(
                "unknown capture '{}' (expected images, links, p or text)",
                other
            ))),
        }
    }
}

/// What to pull from the page, if anything.
#[derive(Debug, Clone, Default)]
pub struct Enrichment {
    pub capture: Option<Capture>,
    pub fetch_title: bool,
}

impl Enrichment {
    pub fn is_empty(&self) -> bool {
        self.capture.is_none() && !self.fetch_title
    }
}

/// Whether page content replaces what the section has or only fills gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    Set,
    Fill,
}

/// Fetches the bookmark's page and applies `enrichment`. Returns whether the
/// page was fetched; notes and empty enrichments are left alone.
pub fn enrich<F: Fetcher + ?Sized>(
    section: &mut Section,
    fetcher: &F,
    enrichment: &Enrichment,
    mode: ApplyMode,
) -> bool {
    if enrichment.is_empty() {
        return false;
    }
    let Some(url) = section.url().map(str::to_string) else {
        return false;
    };
    let Some(html) = record_get(section, fetcher.get(&url)) else {
        return false;
    };
    let doc = Html::parse_document(&html);

    if let Some(capture) = enrichment.capture {
        let lines = capture.extract(&doc);
        match mode {
            ApplyMode::Set => section.set_body(lines),
            ApplyMode::Fill => section.fill_body(lines),
        }
    }
    if enrichment.fetch_title {
        let title = extract::title(&doc);
        if !title.is_empty() {
            match mode {
                ApplyMode::Set => section.set_field_value(TITLE, title),
                ApplyMode::Fill => section.fill_field(TITLE, title),
            }
        }
    }
    true
}

#[cfg(test)]
pub(crate) mod test_fetcher {
    use super::fetch::{FetchOutcome, Fetcher};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Canned outcomes per url; unknown urls fail with a transport error.
    #[derive(Default)]
    pub struct StubFetcher {
        pages: HashMap<String, FetchOutcome>,
        pub requests: RefCell<Vec<String>>,
    }

    impl StubFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, url: &str, outcome: FetchOutcome) -> Self {
            self.pages.insert(url.to_string(), outcome);
            self
        }

        fn outcome(&self, url: &str) -> FetchOutcome {
            self.requests.borrow_mut().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .unwrap_or_else(|| FetchOutcome::Error("connection refused".to_string()))
        }
    }

    impl Fetcher for StubFetcher {
        fn get(&self, url: &str) -> FetchOutcome {
            self.outcome(url)
        }

        fn head(&self, url: &str) -> FetchOutcome {
            match self.outcome(url) {
                FetchOutcome::Ok(_) => FetchOutcome::Ok(String::new()),
                other => other,
            }
        }
    }
}
