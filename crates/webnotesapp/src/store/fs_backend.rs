use super::backend::StorageBackend;
use crate::error::{Result, WebnotesError};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use walkdir::WalkDir;

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(WebnotesError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn list_files(&self, ext: &str, exclude_dir: &str) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let excluded = Path::new(exclude_dir);
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                exclude_dir.is_empty()
                    || e.path().strip_prefix(&self.root).map_or(true, |rel| rel != excluded)
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| WebnotesError::Io(e.into()))?;
            if !entry.file_type().is_file()
                || !entry.file_name().to_string_lossy().ends_with(ext)
            {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(&self.root) {
                files.push(rel.to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }

    fn read(&self, path: &Path) -> Result<Option<String>> {
        let full = self.full_path(path);
        if !full.is_file() {
            return Ok(None);
        }
        let text = fs::read_to_string(full).map_err(WebnotesError::Io)?;
        Ok(Some(text))
    }

    fn write(&self, path: &Path, text: &str) -> Result<()> {
        let target = self.full_path(path);
        let dir = target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        self.ensure_dir(&dir)?;

        // Atomic Write
        let tmp_path = dir.join(format!(".wn-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, text).map_err(WebnotesError::Io)?;
        fs::rename(&tmp_path, target).map_err(WebnotesError::Io)?;

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.full_path(path).exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.full_path(path).is_dir()
    }

    fn reset_dir(&self, path: &Path) -> Result<()> {
        let full = self.full_path(path);
        if full.exists() {
            if !full.is_dir() {
                return Err(WebnotesError::Store(format!(
                    "{} exists and is not a directory",
                    path.display()
                )));
            }
            fs::remove_dir_all(&full).map_err(WebnotesError::Io)?;
        }
        fs::create_dir_all(&full).map_err(WebnotesError::Io)?;
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        self.ensure_dir(&self.full_path(path))
    }
}
