use crate::commands::helpers::{update_matches, Selection};
use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::{Result, WebnotesError};
use crate::store::{DocumentStore, StorageBackend};

/// What `clear` removes from each matched section.
#[derive(Debug, Clone, Default)]
pub struct ClearTargets {
    pub fields: Vec<String>,
    pub body: bool,
    /// Every field and the body.
    pub all: bool,
}

impl ClearTargets {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && !self.body && !self.all
    }
}

pub fn run<B: StorageBackend>(
    store: &DocumentStore<B>,
    selection: &Selection,
    targets: &ClearTargets,
) -> Result<CmdResult> {
    if targets.is_empty() {
        return Err(WebnotesError::Api("Nothing to clear".to_string()));
    }

    let touched = update_matches(store, selection, |section| {
        if targets.all {
            section.delete_all();
            return Ok(());
        }
        for name in &targets.fields {
            section.delete_field(name);
        }
        if targets.body {
            section.delete_body();
        }
        Ok(())
    })?;

    let mut result = CmdResult::default();
    if touched.sections == 0 {
        result.add_message(CmdMessage::info("No sections matched"));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Cleared {} section{}",
            touched.sections,
            plural(touched.sections)
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::Serializer;
    use crate::store::MemBackend;
    use std::path::Path;

    const TEXT: &str = "# note://n\ntitle: T\nauthor: A\nstatus: 404 Not Found\n\nbody\n";

    fn cleared(targets: ClearTargets) -> String {
        let store = DocumentStore::new(
            MemBackend::new().with_file("a.wn", TEXT),
            Serializer::default(),
        );
        run(&store, &Selection::default(), &targets).unwrap();
        store.backend().read(Path::new("a.wn")).unwrap().unwrap()
    }

    #[test]
    fn clears_named_fields() {
        let out = cleared(ClearTargets {
            fields: vec!["status".into(), "author".into()],
            ..Default::default()
        });
        assert_eq!(out, "# note://n\ntitle: T\n\nbody\n");
    }

    #[test]
    fn clears_body() {
        let out = cleared(ClearTargets {
            body: true,
            ..Default::default()
        });
        assert_eq!(out, "# note://n\ntitle: T\nauthor: A\nstatus: 404 Not Found\n");
    }

    #[test]
    fn clears_everything() {
        let out = cleared(ClearTargets {
            all: true,
            ..Default::default()
        });
        assert_eq!(out, "# note://n\n");
    }

    #[test]
    fn requires_a_target() {
        let store = DocumentStore::new(MemBackend::new(), Serializer::default());
        assert!(run(&store, &Selection::default(), &ClearTargets::default()).is_err());
    }
}
