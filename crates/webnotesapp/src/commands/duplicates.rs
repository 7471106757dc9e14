use crate::commands::helpers::{collect_matches, Selection};
use crate::commands::{CmdMessage, CmdResult, Duplicate};
use crate::error::Result;
use crate::store::{DocumentStore, StorageBackend};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Reports every id found in more than one selected file, sorted by id.
/// Repeats inside a single file are not duplicates here.
pub fn run<B: StorageBackend>(store: &DocumentStore<B>, selection: &Selection) -> Result<CmdResult> {
    let mut seen: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for (path, section) in collect_matches(store, selection)? {
        let paths = seen.entry(section.id().to_string()).or_default();
        if !paths.contains(&path) {
            paths.push(path);
        }
    }

    let mut result = CmdResult::default();
    result.duplicates = seen
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(id, paths)| Duplicate { id, paths })
        .collect();
    if result.duplicates.is_empty() {
        result.add_message(CmdMessage::info("No duplicates found"));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::Serializer;
    use crate::store::MemBackend;
    use std::path::Path;

    #[test]
    fn reports_ids_across_files() {
        let store = DocumentStore::new(
            MemBackend::new()
                .with_file("a.wn", "# https://z.com/\n\n# note://same\n\n# note://same\n")
                .with_file("b.wn", "# https://z.com/\n\n# note://only_b\n")
                .with_file("c.wn", "# https://z.com/\n"),
            Serializer::default(),
        );
        let result = run(&store, &Selection::default()).unwrap();
        assert_eq!(result.duplicates.len(), 1);
        assert_eq!(result.duplicates[0].id, "https://z.com/");
        assert_eq!(
            result.duplicates[0].paths,
            vec![
                Path::new("a.wn").to_path_buf(),
                Path::new("b.wn").to_path_buf(),
                Path::new("c.wn").to_path_buf()
            ]
        );
    }

    #[test]
    fn none_found() {
        let store = DocumentStore::new(
            MemBackend::new().with_file("a.wn", "# note://x\n"),
            Serializer::default(),
        );
        let result = run(&store, &Selection::default()).unwrap();
        assert!(result.duplicates.is_empty());
        assert_eq!(result.messages[0].content, "No duplicates found");
    }
}
