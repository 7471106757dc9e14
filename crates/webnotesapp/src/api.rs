//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every webnotes verb, whatever the UI.
//!
//! The facade:
//! - **Owns the wiring**: the [`DocumentStore`], the [`Fetcher`] and the
//!   [`WebnotesConfig`]
//! - **Normalizes inputs**: comma-separated tag strings are split and
//!   validated, `--today` becomes a date in the configured format
//! - **Dispatches** to `commands/*.rs` and returns `Result<CmdResult>`
//!
//! It has no business logic and does no terminal I/O.
//!
//! ## Generic Over Storage and Network
//!
//! `WebnotesApi<B, F>` is generic over both collaborators:
//! - Production: `WebnotesApi<FsBackend, HttpFetcher>` (see [`crate::init`])
//! - Testing: `WebnotesApi<MemBackend, StubFetcher>`

use crate::commands::{self, CmdResult, SectionValues};
use crate::commands::clear::ClearTargets;
use crate::commands::helpers::{FileSelector, Selection};
use crate::commands::transfer::TransferMode;
use crate::config::WebnotesConfig;
use crate::enrich::Fetcher;
use crate::error::Result;
use crate::model::DATE;
use crate::store::{DocumentStore, StorageBackend};
use crate::tags::parse_tag_list;
use std::path::Path;

pub struct WebnotesApi<B: StorageBackend, F: Fetcher> {
    store: DocumentStore<B>,
    fetcher: F,
    config: WebnotesConfig,
}

impl<B: StorageBackend, F: Fetcher> WebnotesApi<B, F> {
    pub fn new(store: DocumentStore<B>, fetcher: F, config: WebnotesConfig) -> Self {
        Self {
            store,
            fetcher,
            config,
        }
    }

    pub fn store(&self) -> &DocumentStore<B> {
        &self.store
    }

    pub fn config(&self) -> &WebnotesConfig {
        &self.config
    }

    pub fn today(&self) -> Result<String> {
        self.config.today()
    }

    /// Sets `date` to today on `values`.
    pub fn with_today(&self, values: SectionValues) -> Result<SectionValues> {
        Ok(values.with_field(DATE, self.today()?))
    }

    pub fn add(
        &self,
        out: &Path,
        note: Option<&str>,
        url: Option<&str>,
        values: &SectionValues,
    ) -> Result<CmdResult> {
        commands::add::run(&self.store, &self.fetcher, out, note, url, values)
    }

    pub fn append(&self, selection: &Selection, values: &SectionValues) -> Result<CmdResult> {
        commands::append::run(&self.store, selection, values)
    }

    pub fn clear(&self, selection: &Selection, targets: &ClearTargets) -> Result<CmdResult> {
        commands::clear::run(&self.store, selection, targets)
    }

    pub fn copy(&self, selection: &Selection, out: &Path) -> Result<CmdResult> {
        commands::transfer::run(&self.store, selection, out, TransferMode::Copy)
    }

    pub fn move_sections(&self, selection: &Selection, out: &Path) -> Result<CmdResult> {
        commands::transfer::run(&self.store, selection, out, TransferMode::Move)
    }

    pub fn delete(&self, selection: &Selection) -> Result<CmdResult> {
        commands::delete::run(&self.store, selection)
    }

    pub fn duplicates(&self, selection: &Selection) -> Result<CmdResult> {
        commands::duplicates::run(&self.store, selection)
    }

    pub fn fill(&self, selection: &Selection, values: &SectionValues) -> Result<CmdResult> {
        commands::update::fill(&self.store, &self.fetcher, selection, values)
    }

    pub fn set(&self, selection: &Selection, values: &SectionValues) -> Result<CmdResult> {
        commands::update::set(&self.store, &self.fetcher, selection, values)
    }

    pub fn format(&self, files: &FileSelector) -> Result<CmdResult> {
        commands::format::run(&self.store, files)
    }

    pub fn head(&self, selection: &Selection) -> Result<CmdResult> {
        commands::head::run(&self.store, &self.fetcher, selection)
    }

    pub fn index(&self) -> Result<CmdResult> {
        commands::index::run(&self.store)
    }

    pub fn matches(&self, selection: &Selection) -> Result<CmdResult> {
        commands::matches::run(&self.store, selection)
    }

    /// `tags` is a comma-separated list.
    pub fn tag(&self, selection: &Selection, tags: &str) -> Result<CmdResult> {
        let tags = parse_tag_list(tags)?;
        commands::tagging::add_tags(&self.store, selection, &tags)
    }

    pub fn untag(&self, selection: &Selection, tags: &str) -> Result<CmdResult> {
        let tags = parse_tag_list(tags)?;
        commands::tagging::remove_tags(&self.store, selection, &tags)
    }

    pub fn html(&self, selection: &Selection, link_prefix: &str) -> Result<CmdResult> {
        commands::html::run(&self.store, selection, link_prefix)
    }
}
