use crate::commands::helpers::{selected_paths, FileSelector};
use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{DocumentStore, StorageBackend};

/// Reparses the selected files and rewrites the ones whose canonical form
/// differs from what is on disk.
pub fn run<B: StorageBackend>(store: &DocumentStore<B>, files: &FileSelector) -> Result<CmdResult> {
    let mut rewritten = 0;
    for path in selected_paths(store, files)? {
        let original = store.backend().read(&path)?.unwrap_or_default();
        let doc = store.load(&path)?;
        if store.render(&doc) != original {
            store.save(&doc)?;
            rewritten += 1;
        }
    }

    let mut result = CmdResult::default();
    if rewritten == 0 {
        result.add_message(CmdMessage::info("All files already formatted"));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Formatted {} file{}",
            rewritten,
            plural(rewritten)
        )));
    }
    Ok(result)
}
