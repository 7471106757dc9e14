use crate::commands::helpers::{matching_indexes, selected_paths, Selection};
use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{DocumentStore, StorageBackend};

/// Removes every matched section from its document.
pub fn run<B: StorageBackend>(store: &DocumentStore<B>, selection: &Selection) -> Result<CmdResult> {
    let mut count = 0;
    for path in selected_paths(store, &selection.files)? {
        let mut doc = store.load(&path)?;
        let indexes = matching_indexes(&doc, &selection.matcher);
        if indexes.is_empty() {
            continue;
        }
        count += doc.remove_sections(&indexes).len();
        store.save(&doc)?;
    }

    let mut result = CmdResult::default();
    if count == 0 {
        result.add_message(CmdMessage::info("No sections matched"));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Deleted {} section{}",
            count,
            plural(count)
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::FileSelector;
    use crate::matcher::{Matcher, SelectionCriteria};
    use crate::serializer::Serializer;
    use crate::store::MemBackend;
    use std::path::Path;

    #[test]
    fn deletes_matched_sections_only() {
        let store = DocumentStore::new(
            MemBackend::new()
                .with_file("a.wn", "# note://keep\n\n# note://drop\ntags: old\n\n# note://keep2\n")
                .with_file("sub/b.wn", "# note://drop2\ntags: old\n"),
            Serializer::default(),
        );
        let matcher = Matcher::build(&SelectionCriteria {
            any_tags: vec!["old".into()],
            ..Default::default()
        })
        .unwrap();
        let files = FileSelector::new(Some(Path::new(".")), None).unwrap();
        let result = run(&store, &Selection::new(files, matcher)).unwrap();
        assert_eq!(result.messages[0].content, "Deleted 1 section");
        assert_eq!(
            store.backend().read(Path::new("a.wn")).unwrap().as_deref(),
            Some("# note://keep\n\n# note://keep2\n")
        );
        assert_eq!(
            store.backend().read(Path::new("sub/b.wn")).unwrap().as_deref(),
            Some("# note://drop2\ntags: old\n")
        );
    }
}
