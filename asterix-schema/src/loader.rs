//! `SchemaLoader` (spec §4.7, component C9): turns one or more XML
//! documents into validated [`Category`] values, never panicking and never
//! stopping at the first error within a source.

use std::collections::HashSet;

use crate::error::SchemaError;
use crate::model::Category;
use crate::xml;

/// Parses and validates a single category XML document.
///
/// On success returns the validated [`Category`]. On failure returns every
/// [`SchemaError`] found in the document, not just the first.
pub fn load_str(xml_source: &str) -> Result<Category, Vec<SchemaError>> {
    log::trace!("parsing schema source ({} bytes)", xml_source.len());
    let parsed = xml::parse_xml(xml_source).map_err(|e| vec![e])?;
    let category = xml::build_category(parsed)?;
    log::debug!("loaded category {} with {} edition(s)", category.id, category.editions.len());
    Ok(category)
}

/// Parses and validates several category XML documents, collecting the
/// categories that loaded cleanly and every error across all sources.
///
/// Unlike [`load_str`], a failure in one source does not prevent the
/// others from being tried (spec §4.7: a schema load failure is reported
/// against the offending source, not the whole batch). A category id
/// repeated across sources is reported as [`SchemaError::DuplicateCategory`]
/// and only the first-loaded copy is kept.
pub fn load_all<'a>(xml_sources: impl IntoIterator<Item = &'a str>) -> (Vec<Category>, Vec<SchemaError>) {
    let mut categories = Vec::new();
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();
    for source in xml_sources {
        match load_str(source) {
            Ok(category) => {
                if !seen_ids.insert(category.id) {
                    log::warn!("duplicate category {} ignored", category.id);
                    errors.push(SchemaError::DuplicateCategory { category: category.id });
                    continue;
                }
                categories.push(category);
            }
            Err(mut source_errors) => {
                for e in &source_errors {
                    log::warn!("schema load error: {e}");
                }
                errors.append(&mut source_errors);
            }
        }
    }
    (categories, errors)
}
