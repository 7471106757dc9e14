use crate::commands::helpers::{update_matches, Selection};
use crate::commands::update::set_values;
use crate::commands::{plural, CmdMessage, CmdResult, SectionValues};
use crate::error::{Result, WebnotesError};
use crate::store::{DocumentStore, StorageBackend};

/// Merges `values` into each matched section with [`crate::model::Section::add`]:
/// singleton fields already present are kept, other fields gain the new
/// values, and the body is appended after a blank line.
pub fn run<B: StorageBackend>(
    store: &DocumentStore<B>,
    selection: &Selection,
    values: &SectionValues,
) -> Result<CmdResult> {
    if !values.enrichment.is_empty() {
        return Err(WebnotesError::Api(
            "append does not fetch pages; use set or fill".to_string(),
        ));
    }
    if values.is_empty() {
        return Err(WebnotesError::Api("No values specified".to_string()));
    }
    values.validate()?;

    let touched = update_matches(store, selection, |section| {
        let mut incoming = section.clone();
        incoming.delete_all();
        set_values(&mut incoming, values);
        section.add(&incoming);
        Ok(())
    })?;

    let mut result = CmdResult::default();
    if touched.sections == 0 {
        result.add_message(CmdMessage::info("No sections matched"));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Appended to {} section{}",
            touched.sections,
            plural(touched.sections)
        )));
    }
    Ok(result)
}
