use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::build_index;
use crate::store::{DocumentStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &DocumentStore<B>) -> Result<CmdResult> {
    let summary = build_index(store)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Indexed {} section{} from {} file{} into {}",
        summary.sections,
        plural(summary.sections),
        summary.documents,
        plural(summary.documents),
        store.index_dir().display()
    )));
    for collision in &summary.collisions {
        let paths: Vec<String> = collision
            .paths
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        result.add_message(CmdMessage::warning(format!(
            "{} appears in {}",
            collision.id,
            paths.join(", ")
        )));
    }
    result.index = Some(summary);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::serializer::Serializer;
    use crate::store::MemBackend;

    #[test]
    fn warns_about_collisions() {
        let store = DocumentStore::new(
            MemBackend::new()
                .with_file("a.wn", "# https://x.com/\n")
                .with_file("b.wn", "# https://x.com/\n"),
            Serializer::default(),
        );
        let result = run(&store).unwrap();
        assert_eq!(
            result.messages[0].content,
            "Indexed 2 sections from 2 files into wn_index"
        );
        assert!(matches!(result.messages[1].level, MessageLevel::Warning));
        assert_eq!(result.messages[1].content, "https://x.com/ appears in a.wn, b.wn");
        assert_eq!(result.index.unwrap().hosts, 1);
    }
}
