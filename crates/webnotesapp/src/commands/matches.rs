use crate::commands::helpers::{collect_matches, Selection};
use crate::commands::{CmdResult, ListedSection};
use crate::error::Result;
use crate::store::{DocumentStore, StorageBackend};

/// Lists matched sections in file order. Nothing is written.
pub fn run<B: StorageBackend>(store: &DocumentStore<B>, selection: &Selection) -> Result<CmdResult> {
    let listed = collect_matches(store, selection)?
        .into_iter()
        .map(|(path, section)| ListedSection { path, section })
        .collect();
    Ok(CmdResult::default().with_listed_sections(listed))
}
