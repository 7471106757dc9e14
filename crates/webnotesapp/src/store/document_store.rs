use super::backend::StorageBackend;
use crate::error::{Result, WebnotesError};
use crate::model::Document;
use crate::parser::parse_document;
use crate::serializer::Serializer;
use std::path::{Path, PathBuf};

/// Couples a backend with the parser and the serializer.
pub struct DocumentStore<B: StorageBackend> {
    backend: B,
    serializer: Serializer,
    file_ext: String,
    index_dir: String,
}

impl<B: StorageBackend> DocumentStore<B> {
    pub fn new(backend: B, serializer: Serializer) -> Self {
        Self {
            backend,
            serializer,
            file_ext: ".wn".to_string(),
            index_dir: "wn_index".to_string(),
        }
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
        self
    }

    pub fn with_index_dir(mut self, dir: &str) -> Self {
        self.index_dir = dir.to_string();
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn serializer(&self) -> &Serializer {
        &self.serializer
    }

    pub fn file_ext(&self) -> &str {
        &self.file_ext
    }

    pub fn index_dir(&self) -> &Path {
        Path::new(&self.index_dir)
    }

    /// All documents of the collection, index tree excluded.
    pub fn document_paths(&self) -> Result<Vec<PathBuf>> {
        self.backend.list_files(&self.file_ext, &self.index_dir)
    }

    pub fn is_document_path(&self, path: &Path) -> bool {
        path.to_string_lossy().ends_with(&self.file_ext)
    }

    pub fn load(&self, path: &Path) -> Result<Document> {
        let text = self.backend.read(path)?.ok_or_else(|| {
            WebnotesError::Store(format!("File not found: {}", path.display()))
        })?;
        let doc = parse_document(path, &text)?;
        tracing::debug!(path = %path.display(), sections = doc.len(), "loaded document");
        Ok(doc)
    }

    /// Loads the document, or starts an empty one when the file is absent.
    pub fn load_or_new(&self, path: &Path) -> Result<Document> {
        match self.backend.read(path)? {
            Some(text) => parse_document(path, &text),
            None => {
                if self.backend.is_dir(path) {
                    return Err(WebnotesError::Store(format!(
                        "{} is a directory",
                        path.display()
                    )));
                }
                Ok(Document::new(path))
            }
        }
    }

    pub fn render(&self, doc: &Document) -> String {
        self.serializer.render_document(doc)
    }

    pub fn save(&self, doc: &Document) -> Result<()> {
        self.backend.write(doc.path(), &self.render(doc))?;
        tracing::debug!(path = %doc.path().display(), sections = doc.len(), "saved document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;
    use crate::store::mem_backend::MemBackend;

    fn store(backend: MemBackend) -> DocumentStore<MemBackend> {
        DocumentStore::new(backend, Serializer::default())
    }

    #[test]
    fn document_paths_skip_index_and_other_extensions() {
        let store = store(
            MemBackend::new()
                .with_file("b.wn", "")
                .with_file("a.wn", "")
                .with_file("readme.md", "")
                .with_file("wn_index/hosts/x.wn", ""),
        );
        assert_eq!(
            store.document_paths().unwrap(),
            vec![PathBuf::from("a.wn"), PathBuf::from("b.wn")]
        );
    }

    #[test]
    fn custom_extension() {
        let store = store(MemBackend::new().with_file("a.notes", "").with_file("b.wn", ""))
            .with_file_ext("notes");
        assert_eq!(store.document_paths().unwrap(), vec![PathBuf::from("a.notes")]);
    }

    #[test]
    fn load_missing_file_fails() {
        let store = store(MemBackend::new());
        assert!(store.load(Path::new("a.wn")).is_err());
        assert!(store.load_or_new(Path::new("a.wn")).unwrap().is_empty());
    }

    #[test]
    fn save_then_load() {
        let store = store(MemBackend::new());
        let mut doc = Document::new("a.wn");
        doc.push(Section::note("hello").unwrap());
        store.save(&doc).unwrap();

        let loaded = store.load(Path::new("a.wn")).unwrap();
        assert_eq!(loaded, doc);
        assert_eq!(
            store.backend().read(Path::new("a.wn")).unwrap().as_deref(),
            Some("# note://hello\n")
        );
    }

    #[test]
    fn save_propagates_write_errors() {
        let store = store(MemBackend::new());
        store.backend().set_simulate_write_error(true);
        assert!(store.save(&Document::new("a.wn")).is_err());
    }
}
