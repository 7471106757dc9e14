//! `set` and `fill`: write values into matched sections.
//!
//! `set` replaces: scalar fields, the body and the tag list are overwritten.
//! `fill` only writes what is missing: absent fields, an empty body, and tags
//! are added to the ones already there.

use crate::commands::helpers::{update_matches, Selection};
use crate::commands::{plural, CmdMessage, CmdResult, SectionValues};
use crate::enrich::{enrich, ApplyMode, Fetcher};
use crate::error::{Result, WebnotesError};
use crate::model::Section;
use crate::store::{DocumentStore, StorageBackend};

pub(crate) fn body_lines(body: &str) -> Vec<String> {
    body.lines().map(str::to_string).collect()
}

pub(crate) fn set_values(section: &mut Section, values: &SectionValues) {
    for (name, value) in &values.fields {
        section.set_field_value(name, value.clone());
    }
    if let Some(body) = &values.body {
        section.set_body(body_lines(body));
    }
    if !values.tags.is_empty() {
        section.set_tags(&values.tags);
    }
}

pub(crate) fn fill_values(section: &mut Section, values: &SectionValues) {
    for (name, value) in &values.fields {
        section.fill_field(name, value.clone());
    }
    if let Some(body) = &values.body {
        section.fill_body(body_lines(body));
    }
    section.add_tags(&values.tags);
}

pub fn set<B: StorageBackend, F: Fetcher + ?Sized>(
    store: &DocumentStore<B>,
    fetcher: &F,
    selection: &Selection,
    values: &SectionValues,
) -> Result<CmdResult> {
    run(store, fetcher, selection, values, ApplyMode::Set)
}

pub fn fill<B: StorageBackend, F: Fetcher + ?Sized>(
    store: &DocumentStore<B>,
    fetcher: &F,
    selection: &Selection,
    values: &SectionValues,
) -> Result<CmdResult> {
    run(store, fetcher, selection, values, ApplyMode::Fill)
}

fn run<B: StorageBackend, F: Fetcher + ?Sized>(
    store: &DocumentStore<B>,
    fetcher: &F,
    selection: &Selection,
    values: &SectionValues,
    mode: ApplyMode,
) -> Result<CmdResult> {
    if values.is_empty() {
        return Err(WebnotesError::Api("No values specified".to_string()));
    }
    values.validate()?;

    let touched = update_matches(store, selection, |section| {
        match mode {
            ApplyMode::Set => set_values(section, values),
            ApplyMode::Fill => fill_values(section, values),
        }
        enrich(section, fetcher, &values.enrichment, mode);
        Ok(())
    })?;

    let mut result = CmdResult::default();
    if touched.sections == 0 {
        result.add_message(CmdMessage::info("No sections matched"));
    } else {
        let verb = match mode {
            ApplyMode::Set => "Set",
            ApplyMode::Fill => "Filled",
        };
        result.add_message(CmdMessage::success(format!(
            "{} values on {} section{} in {} file{}",
            verb,
            touched.sections,
            plural(touched.sections),
            touched.documents,
            plural(touched.documents)
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::test_fetcher::StubFetcher;
    use crate::enrich::{Capture, Enrichment, FetchOutcome};
    use crate::model::{DATE, TITLE};
    use crate::serializer::Serializer;
    use crate::store::MemBackend;
    use std::path::Path;

    fn store() -> DocumentStore<MemBackend> {
        DocumentStore::new(
            MemBackend::new().with_file(
                "a.wn",
                "# note://one\ntitle: Old\ntags: x\n\nold body\n\n# https://example.com/\n",
            ),
            Serializer::default(),
        )
    }

    fn text(store: &DocumentStore<MemBackend>) -> String {
        store.backend().read(Path::new("a.wn")).unwrap().unwrap()
    }

    #[test]
    fn set_overwrites() {
        let store = store();
        let values = SectionValues {
            tags: vec!["y".into()],
            body: Some("new body".into()),
            ..Default::default()
        }
        .with_field(TITLE, "New");
        set(&store, &StubFetcher::new(), &Selection::default(), &values).unwrap();
        assert_eq!(
            text(&store),
            "# note://one\ntitle: New\ntags: y\n\nnew body\n\n# https://example.com/\ntitle: New\ntags: y\n\nnew body\n"
        );
    }

    #[test]
    fn fill_keeps_existing_values() {
        let store = store();
        let values = SectionValues {
            tags: vec!["y".into()],
            body: Some("filled".into()),
            ..Default::default()
        }
        .with_field(TITLE, "New")
        .with_field(DATE, "2024-01-02");
        fill(&store, &StubFetcher::new(), &Selection::default(), &values).unwrap();
        assert_eq!(
            text(&store),
            "# note://one\ntitle: Old\ndate: 2024-01-02\ntags: x,y\n\nold body\n\n# https://example.com/\ntitle: New\ndate: 2024-01-02\ntags: y\n\nfilled\n"
        );
    }

    #[test]
    fn set_requires_values() {
        let store = store();
        assert!(set(
            &store,
            &StubFetcher::new(),
            &Selection::default(),
            &SectionValues::default()
        )
        .is_err());
    }

    #[test]
    fn set_rejects_empty_or_multiline_value() {
        let store = store();
        let before = text(&store);
        for bad in ["", "first\nsecond"] {
            let values = SectionValues::default().with_field(TITLE, bad);
            assert!(set(&store, &StubFetcher::new(), &Selection::default(), &values).is_err());
        }
        assert_eq!(text(&store), before);
    }

    #[test]
    fn set_with_capture_fetches_bookmarks_only() {
        let store = store();
        let fetcher = StubFetcher::new().with(
            "https://example.com/",
            FetchOutcome::Ok("<title>Example</title><p>Hello</p>".into()),
        );
        let values = SectionValues {
            enrichment: Enrichment {
                capture: Some(Capture::Paragraphs),
                fetch_title: true,
            },
            ..Default::default()
        };
        set(&store, &fetcher, &Selection::default(), &values).unwrap();
        assert_eq!(fetcher.requests.borrow().len(), 1);
        assert!(text(&store).ends_with("# https://example.com/\ntitle: Example\n\nHello\n"));
    }

    #[test]
    fn failed_fetch_does_not_abort() {
        let store = DocumentStore::new(
            MemBackend::new().with_file("a.wn", "# https://down.com/\n\n# https://up.com/\n"),
            Serializer::default(),
        );
        let fetcher = StubFetcher::new().with(
            "https://up.com/",
            FetchOutcome::Ok("<title>Up</title>".into()),
        );
        let values = SectionValues {
            enrichment: Enrichment {
                capture: None,
                fetch_title: true,
            },
            ..Default::default()
        };
        set(&store, &fetcher, &Selection::default(), &values).unwrap();
        assert_eq!(
            text(&store),
            "# https://down.com/\nerror: connection refused\n\n# https://up.com/\ntitle: Up\n"
        );
    }
}
