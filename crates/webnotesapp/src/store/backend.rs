use crate::error::Result;
use std::path::{Path, PathBuf};

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while [`super::DocumentStore`] handles the "what" (parsing, rendering).
///
/// All paths are relative to the collection root.
pub trait StorageBackend {
    // --- Discovery ---

    /// Every file whose name ends in `ext`, skipping `exclude_dir` (relative
    /// to the root). Sorted by path.
    fn list_files(&self, ext: &str, exclude_dir: &str) -> Result<Vec<PathBuf>>;

    // --- Content Operations ---

    /// Read a file. Returns Ok(None) if it does not exist.
    fn read(&self, path: &Path) -> Result<Option<String>>;

    /// Write a file, creating parent directories.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, path: &Path, text: &str) -> Result<()>;

    // --- Paths & Directories ---

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Makes `path` an empty directory: fails if it is a file, deletes it
    /// recursively if it is a directory, then creates it.
    fn reset_dir(&self, path: &Path) -> Result<()>;

    fn create_dir(&self, path: &Path) -> Result<()>;
}
