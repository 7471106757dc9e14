//! # Secondary Index
//!
//! The index is a rebuildable view of the collection under `<index_dir>/`:
//!
//! ```text
//! wn_index/
//! ├── authors/<md5(author)>.wn   # every section with that author
//! ├── authors/index              # "<md5>: <author>" lines
//! ├── hosts/<md5(host)>.wn       # every bookmark on that host
//! ├── hosts/index
//! ├── notes/index                # "<path>#<note>" lines
//! ├── tags/<md5(tag)>.wn         # every section carrying that tag
//! └── tags/index
//! ```
//!
//! File names are the lowercase hex MD5 of the display name, so any author,
//! host or tag maps to a safe, stable file name. A rebuild always starts from
//! an empty directory; nothing is updated incrementally.
//!
//! A note that appears twice in the same file is fatal. The same note-string
//! or url in several files is only reported back as a collision.

use md5::{Digest, Md5};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::error::{Result, WebnotesError};
use crate::model::{Document, Identity, Section, AUTHOR};
use crate::store::{DocumentStore, StorageBackend};

pub const AUTHORS: &str = "authors";
pub const HOSTS: &str = "hosts";
pub const NOTES: &str = "notes";
pub const TAGS: &str = "tags";
pub const LISTING_FILE: &str = "index";

pub const CATEGORIES: &[&str] = &[AUTHORS, HOSTS, NOTES, TAGS];

/// Lowercase hex MD5 of `name`.
pub fn content_hash(name: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct IndexEntry {
    pub name: String,
    pub hash: String,
}

impl IndexEntry {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            hash: content_hash(name),
        }
    }
}

/// An identity found in more than one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub id: String,
    pub paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexSummary {
    pub documents: usize,
    pub sections: usize,
    pub authors: usize,
    pub hosts: usize,
    pub notes: usize,
    pub tags: usize,
    pub collisions: Vec<Collision>,
}

/// Synthetic documents of one category, keyed by hash.
struct Category {
    dir: PathBuf,
    ext: String,
    groups: BTreeMap<String, (String, Document)>,
}

impl Category {
    fn new(index_root: &Path, name: &str, ext: &str) -> Self {
        Self {
            dir: index_root.join(name),
            ext: ext.to_string(),
            groups: BTreeMap::new(),
        }
    }

    fn add(&mut self, name: &str, section: &Section) {
        let entry = IndexEntry::new(name);
        let path = self.dir.join(format!("{}{}", entry.hash, self.ext));
        self.groups
            .entry(entry.hash)
            .or_insert_with(|| (entry.name, Document::new(path)))
            .1
            .push(section.clone());
    }

    fn listing(&self) -> String {
        let mut entries: Vec<IndexEntry> = self
            .groups
            .iter()
            .map(|(hash, (name, _))| IndexEntry {
                name: name.clone(),
                hash: hash.clone(),
            })
            .collect();
        entries.sort();
        entries
            .iter()
            .map(|e| format!("{}: {}\n", e.hash, e.name))
            .collect()
    }

    fn save<B: StorageBackend>(&self, store: &DocumentStore<B>) -> Result<()> {
        for (_, doc) in self.groups.values() {
            store.save(doc)?;
        }
        store
            .backend()
            .write(&self.dir.join(LISTING_FILE), &self.listing())
    }
}

/// Deletes and rebuilds the whole index tree.
pub fn build_index<B: StorageBackend>(store: &DocumentStore<B>) -> Result<IndexSummary> {
    let root = store.index_dir().to_path_buf();
    let backend = store.backend();
    backend.reset_dir(&root)?;
    for category in CATEGORIES {
        backend.create_dir(&root.join(category))?;
    }

    let mut authors = Category::new(&root, AUTHORS, store.file_ext());
    let mut hosts = Category::new(&root, HOSTS, store.file_ext());
    let mut tags = Category::new(&root, TAGS, store.file_ext());
    let mut notes: BTreeSet<String> = BTreeSet::new();
    let mut seen: BTreeMap<Identity, Vec<PathBuf>> = BTreeMap::new();
    let mut summary = IndexSummary::default();

    for path in store.document_paths()? {
        let doc = store.load(&path)?;
        summary.documents += 1;
        let path_str = path.display().to_string();

        for section in doc.sections() {
            summary.sections += 1;
            let paths = seen.entry(section.identity().clone()).or_default();
            if !paths.contains(&path) {
                paths.push(path.clone());
            }

            match section.identity() {
                Identity::Note(note) => {
                    let key = format!("{}#{}", path_str, note);
                    if !notes.insert(key.clone()) {
                        return Err(WebnotesError::DuplicateNote(key));
                    }
                }
                Identity::Bookmark(_) => {
                    if let Some(host) = section.host() {
                        hosts.add(&host, section);
                    }
                }
            }
            if let Some(author) = section.field_value(AUTHOR) {
                authors.add(author, section);
            }
            for tag in section.tags() {
                tags.add(tag, section);
            }
        }
    }

    authors.save(store)?;
    hosts.save(store)?;
    tags.save(store)?;
    let note_listing: String = notes.iter().map(|k| format!("{}\n", k)).collect();
    backend.write(&root.join(NOTES).join(LISTING_FILE), &note_listing)?;

    summary.authors = authors.groups.len();
    summary.hosts = hosts.groups.len();
    summary.tags = tags.groups.len();
    summary.notes = notes.len();
    summary.collisions = seen
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(identity, paths)| Collision {
            id: identity.as_str().to_string(),
            paths,
        })
        .collect();

    for collision in &summary.collisions {
        tracing::warn!(
            id = %collision.id,
            files = collision.paths.len(),
            "identity found in more than one file"
        );
    }
    tracing::info!(
        documents = summary.documents,
        sections = summary.sections,
        authors = summary.authors,
        hosts = summary.hosts,
        tags = summary.tags,
        "index rebuilt"
    );
    Ok(summary)
}
