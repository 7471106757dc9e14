use crate::commands::helpers::{update_matches, Selection};
use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::{Result, WebnotesError};
use crate::store::{DocumentStore, StorageBackend};

pub fn add_tags<B: StorageBackend>(
    store: &DocumentStore<B>,
    selection: &Selection,
    tags: &[String],
) -> Result<CmdResult> {
    if tags.is_empty() {
        return Err(WebnotesError::Api("No tags specified".to_string()));
    }
    let touched = update_matches(store, selection, |section| {
        section.add_tags(tags);
        Ok(())
    })?;
    Ok(report("Tagged", touched.sections))
}

/// Removing the last tag removes the `tags` field.
pub fn remove_tags<B: StorageBackend>(
    store: &DocumentStore<B>,
    selection: &Selection,
    tags: &[String],
) -> Result<CmdResult> {
    if tags.is_empty() {
        return Err(WebnotesError::Api("No tags specified".to_string()));
    }
    let touched = update_matches(store, selection, |section| {
        section.delete_tags(tags);
        Ok(())
    })?;
    Ok(report("Untagged", touched.sections))
}

fn report(verb: &str, count: usize) -> CmdResult {
    let mut result = CmdResult::default();
    if count == 0 {
        result.add_message(CmdMessage::info("No sections matched"));
    } else {
        result.add_message(CmdMessage::success(format!(
            "{} {} section{}",
            verb,
            count,
            plural(count)
        )));
    }
    result
}
