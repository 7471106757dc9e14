use crate::commands::helpers::load_out_file;
use crate::commands::update::set_values;
use crate::commands::{CmdMessage, CmdResult, SectionValues};
use crate::enrich::{enrich, ApplyMode, Fetcher};
use crate::error::Result;
use crate::model::Section;
use crate::store::{DocumentStore, StorageBackend};
use std::path::Path;

/// Builds a new section from `note` or `url` and appends it to `out`, which is
/// created when missing.
pub fn run<B: StorageBackend, F: Fetcher + ?Sized>(
    store: &DocumentStore<B>,
    fetcher: &F,
    out: &Path,
    note: Option<&str>,
    url: Option<&str>,
    values: &SectionValues,
) -> Result<CmdResult> {
    values.validate()?;
    let mut doc = load_out_file(store, out)?;
    let mut section = Section::new(note, url)?;
    set_values(&mut section, values);
    enrich(&mut section, fetcher, &values.enrichment, ApplyMode::Set);

    let id = section.id().to_string();
    doc.push(section);
    store.save(&doc)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Added {} to {}",
        id,
        doc.path().display()
    )));
    Ok(result)
}
