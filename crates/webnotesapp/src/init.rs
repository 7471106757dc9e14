//! # Collection Setup
//!
//! A collection is a directory tree of webnote files. Every operation runs
//! against one root (the current directory unless `--root` is given).
//!
//! [`initialize`] loads the configuration and wires the production pieces
//! together: an [`FsBackend`] on the root, a [`Serializer`] with the configured
//! field order, and an [`HttpFetcher`] with the configured timeout.
//!
//! ## Config Resolution
//!
//! `webnotes.toml` is searched in the global config directory and then in the
//! collection root; both are merged, the root winning. The global directory is
//! `WEBNOTES_CONFIG_DIR` when set (used by tests to isolate global state),
//! otherwise the OS config directory from the `directories` crate.

use crate::api::WebnotesApi;
use crate::config::WebnotesConfig;
use crate::enrich::HttpFetcher;
use crate::error::Result;
use crate::serializer::Serializer;
use crate::store::{DocumentStore, FsBackend};
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "webnotes.toml";

pub struct WebnotesContext {
    pub api: WebnotesApi<FsBackend, HttpFetcher>,
    pub config: WebnotesConfig,
    pub root: PathBuf,
}

pub fn global_config_dir() -> Option<PathBuf> {
    std::env::var("WEBNOTES_CONFIG_DIR")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            ProjectDirs::from("com", "webnotes", "webnotes").map(|d| d.config_dir().to_path_buf())
        })
}

pub fn load_config(root: &Path) -> WebnotesConfig {
    let mut search_paths = Vec::new();
    if let Some(global) = global_config_dir() {
        search_paths.push(SearchPath::Path(global));
    }
    search_paths.push(SearchPath::Path(root.to_path_buf()));

    Clapfig::builder()
        .app_name("webnotes")
        .file_name(CONFIG_FILE)
        .search_paths(search_paths)
        .search_mode(SearchMode::Merge)
        .load()
        .unwrap_or_default()
}

/// Builds the production context for the collection at `root`.
pub fn initialize(root: &Path) -> Result<WebnotesContext> {
    let config = load_config(root);
    tracing::debug!(root = %root.display(), ?config, "loaded configuration");

    let store = DocumentStore::new(FsBackend::new(root), Serializer::new(config.field_order()))
        .with_file_ext(&config.file_ext())
        .with_index_dir(&config.index_dir);
    let fetcher = HttpFetcher::new(Duration::from_secs(config.http_timeout_secs))?;
    let api = WebnotesApi::new(store, fetcher, config.clone());

    Ok(WebnotesContext {
        api,
        config,
        root: root.to_path_buf(),
    })
}
