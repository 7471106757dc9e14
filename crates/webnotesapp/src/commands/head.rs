use crate::commands::helpers::{update_matches, Selection};
use crate::commands::{plural, CmdMessage, CmdResult};
use crate::enrich::{record_head, Fetcher};
use crate::error::Result;
use crate::model::{ERROR, STATUS};
use crate::store::{DocumentStore, StorageBackend};

/// Sends a HEAD request for every matched bookmark. A 200 clears `status`
/// and `error`; anything else is recorded on the section.
pub fn run<B: StorageBackend, F: Fetcher + ?Sized>(
    store: &DocumentStore<B>,
    fetcher: &F,
    selection: &Selection,
) -> Result<CmdResult> {
    let mut checked = 0;
    let mut failed = 0;
    update_matches(store, selection, |section| {
        let Some(url) = section.url().map(str::to_string) else {
            return Ok(());
        };
        checked += 1;
        record_head(section, fetcher.head(&url));
        if section.has_field(STATUS) || section.has_field(ERROR) {
            failed += 1;
        }
        Ok(())
    })?;

    let mut result = CmdResult::default();
    if checked == 0 {
        result.add_message(CmdMessage::info("No bookmarks matched"));
        return Ok(result);
    }
    result.add_message(CmdMessage::success(format!(
        "Checked {} bookmark{}",
        checked,
        plural(checked)
    )));
    if failed > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} bookmark{} failed",
            failed,
            plural(failed)
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::test_fetcher::StubFetcher;
    use crate::enrich::FetchOutcome;
    use crate::serializer::Serializer;
    use crate::store::MemBackend;
    use std::path::Path;

    #[test]
    fn records_liveness() {
        let store = DocumentStore::new(
            MemBackend::new().with_file(
                "a.wn",
                "# note://n\n\n# https://alive.com/\nstatus: 500 Internal Server Error\n\n# https://gone.com/\n\n# https://down.com/\n",
            ),
            Serializer::default(),
        );
        let fetcher = StubFetcher::new()
            .with("https://alive.com/", FetchOutcome::Ok("<html></html>".into()))
            .with("https://gone.com/", FetchOutcome::Status("404 Not Found".into()));

        let result = run(&store, &fetcher, &Selection::default()).unwrap();
        assert_eq!(result.messages[0].content, "Checked 3 bookmarks");
        assert_eq!(result.messages[1].content, "2 bookmarks failed");
        assert_eq!(
            store.backend().read(Path::new("a.wn")).unwrap().as_deref(),
            Some(
                "# note://n\n\n# https://alive.com/\n\n# https://gone.com/\nstatus: 404 Not Found\n\n# https://down.com/\nerror: connection refused\n"
            )
        );
        assert_eq!(fetcher.requests.borrow().len(), 3);
    }
}
