//! `copy` and `move`: append matched sections to another file.
//!
//! The destination is never used as a source, so moving into a file that
//! is itself selected leaves its own sections in place.

use crate::commands::helpers::{load_out_file, matching_indexes, selected_paths, Selection};
use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{DocumentStore, StorageBackend};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    Copy,
    Move,
}

pub fn run<B: StorageBackend>(
    store: &DocumentStore<B>,
    selection: &Selection,
    out: &Path,
    mode: TransferMode,
) -> Result<CmdResult> {
    let mut out_doc = load_out_file(store, out)?;
    let mut count = 0;

    for path in selected_paths(store, &selection.files)? {
        if path == out_doc.path() {
            continue;
        }
        let mut doc = store.load(&path)?;
        let indexes = matching_indexes(&doc, &selection.matcher);
        if indexes.is_empty() {
            continue;
        }
        count += indexes.len();
        match mode {
            TransferMode::Copy => {
                for i in indexes {
                    out_doc.push(doc.sections()[i].clone());
                }
            }
            TransferMode::Move => {
                for section in doc.remove_sections(&indexes) {
                    out_doc.push(section);
                }
                store.save(&doc)?;
            }
        }
    }

    let mut result = CmdResult::default();
    if count == 0 {
        result.add_message(CmdMessage::info("No sections matched"));
        return Ok(result);
    }
    store.save(&out_doc)?;

    let verb = match mode {
        TransferMode::Copy => "Copied",
        TransferMode::Move => "Moved",
    };
    result.add_message(CmdMessage::success(format!(
        "{} {} section{} to {}",
        verb,
        count,
        plural(count),
        out_doc.path().display()
    )));
    Ok(result)
}
