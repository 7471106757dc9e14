use super::backend::StorageBackend;
use crate::error::{Result, WebnotesError};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since webnotes is single-threaded,
/// so the `StorageBackend` trait can use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    files: RefCell<BTreeMap<PathBuf, String>>,
    dirs: RefCell<BTreeSet<PathBuf>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test helper to seed a file.
    pub fn with_file(self, path: impl Into<PathBuf>, text: &str) -> Self {
        self.files.borrow_mut().insert(path.into(), text.to_string());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    pub fn file_count(&self) -> usize {
        self.files.borrow().len()
    }
}

fn is_excluded(path: &Path, exclude_dir: &str) -> bool {
    !exclude_dir.is_empty() && path.starts_with(exclude_dir)
}

impl StorageBackend for MemBackend {
    fn list_files(&self, ext: &str, exclude_dir: &str) -> Result<Vec<PathBuf>> {
        let files = self.files.borrow();
        Ok(files
            .keys()
            .filter(|p| p.to_string_lossy().ends_with(ext))
            .filter(|p| !is_excluded(p, exclude_dir))
            .cloned()
            .collect())
    }

    fn read(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.files.borrow().get(path).cloned())
    }

    fn write(&self, path: &Path, text: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(WebnotesError::Store("Simulated write error".to_string()));
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), text.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.borrow().contains(path)
            || self
                .files
                .borrow()
                .keys()
                .any(|p| p != path && p.starts_with(path))
    }

    fn reset_dir(&self, path: &Path) -> Result<()> {
        if self.files.borrow().contains_key(path) {
            return Err(WebnotesError::Store(format!(
                "{} exists and is not a directory",
                path.display()
            )));
        }
        self.files.borrow_mut().retain(|p, _| !p.starts_with(path));
        self.dirs.borrow_mut().retain(|p| !p.starts_with(path));
        self.dirs.borrow_mut().insert(path.to_path_buf());
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        self.dirs.borrow_mut().insert(path.to_path_buf());
        Ok(())
    }
}
