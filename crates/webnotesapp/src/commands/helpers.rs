use crate::error::{Result, WebnotesError};
use crate::matcher::Matcher;
use crate::model::{Document, Section};
use crate::store::{DocumentStore, StorageBackend};
use std::path::{Component, Path, PathBuf};

/// Which files a verb looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FileSelector {
    #[default]
    All,
    /// Files directly inside this directory (`.` is the root).
    Dir(PathBuf),
    File(PathBuf),
}

impl FileSelector {
    pub fn new(dir: Option<&Path>, file: Option<&Path>) -> Result<Self> {
        match (dir, file) {
            (Some(_), Some(_)) => Err(WebnotesError::Selection(
                "only one of --dir and --file can be specified".to_string(),
            )),
            (Some(dir), None) => Ok(FileSelector::Dir(normalize(dir))),
            (None, Some(file)) => Ok(FileSelector::File(normalize(file))),
            (None, None) => Ok(FileSelector::All),
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        match self {
            FileSelector::All => true,
            FileSelector::Dir(dir) => parent_dir(path) == *dir,
            FileSelector::File(file) => path == file,
        }
    }
}

/// Drops `.` components; the empty path becomes `.`.
pub fn normalize(path: &Path) -> PathBuf {
    let cleaned: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    normalize(path.parent().unwrap_or(Path::new("")))
}

/// A file selector and a section matcher.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub files: FileSelector,
    pub matcher: Matcher,
}

impl Selection {
    pub fn new(files: FileSelector, matcher: Matcher) -> Self {
        Self { files, matcher }
    }
}

pub fn selected_paths<B: StorageBackend>(
    store: &DocumentStore<B>,
    files: &FileSelector,
) -> Result<Vec<PathBuf>> {
    Ok(store
        .document_paths()?
        .into_iter()
        .filter(|p| files.matches(p))
        .collect())
}

pub fn matching_indexes(doc: &Document, matcher: &Matcher) -> Vec<usize> {
    doc.sections()
        .iter()
        .enumerate()
        .filter(|(_, s)| matcher.matches(s))
        .map(|(i, _)| i)
        .collect()
}

/// How many sections matched, in how many documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Touched {
    pub sections: usize,
    pub documents: usize,
}

/// Applies `apply` to every matched section and saves each document that had
/// at least one match.
pub fn update_matches<B, F>(
    store: &DocumentStore<B>,
    selection: &Selection,
    mut apply: F,
) -> Result<Touched>
where
    B: StorageBackend,
    F: FnMut(&mut Section) -> Result<()>,
{
    let mut touched = Touched::default();
    for path in selected_paths(store, &selection.files)? {
        let mut doc = store.load(&path)?;
        let indexes = matching_indexes(&doc, &selection.matcher);
        if indexes.is_empty() {
            continue;
        }
        for &i in &indexes {
            apply(&mut doc.sections_mut()[i])?;
        }
        store.save(&doc)?;
        touched.sections += indexes.len();
        touched.documents += 1;
    }
    Ok(touched)
}

/// Every matched section with its path, in file order.
pub fn collect_matches<B: StorageBackend>(
    store: &DocumentStore<B>,
    selection: &Selection,
) -> Result<Vec<(PathBuf, Section)>> {
    let mut found = Vec::new();
    for path in selected_paths(store, &selection.files)? {
        let doc = store.load(&path)?;
        for i in matching_indexes(&doc, &selection.matcher) {
            found.push((path.clone(), doc.sections()[i].clone()));
        }
    }
    Ok(found)
}

/// Checks that `out` is a document path and loads it, or starts a new one.
pub fn load_out_file<B: StorageBackend>(
    store: &DocumentStore<B>,
    out: &Path,
) -> Result<Document> {
    if !store.is_document_path(out) {
        return Err(WebnotesError::Api(format!(
            "Out file must end with {}",
            store.file_ext()
        )));
    }
    store.load_or_new(&normalize(out))
}
