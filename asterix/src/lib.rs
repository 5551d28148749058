//! # asterix
//!
//! Facade over the workspace: load a [`schema::CategoryRegistry`] from one
//! or more XML schema documents, then decode ASTERIX datablocks against it
//! with [`decode_datablock`] or a whole byte stream with [`decode_stream`].
//!
//! ```no_run
//! use std::collections::HashMap;
//!
//! let xml = std::fs::read_to_string("cat048.xml").unwrap();
//! let (registry, schema_errors) = asterix::load_registry([xml.as_str()]);
//! assert!(schema_errors.is_empty());
//!
//! let datablock: Vec<u8> = vec![];
//! let policy = asterix::decode::DecodePolicy::default();
//! let result = asterix::decode_datablock(&datablock, &registry, &policy, &HashMap::new());
//! for error in &result.errors {
//!     eprintln!("{error}");
//! }
//! ```

pub mod core {
    pub use asterix_core::*;
}

pub mod schema {
    pub use asterix_schema::*;
}

pub mod decode {
    pub use asterix_decode::*;
}

pub use asterix_decode::{decode_datablock, decode_record, decode_stream, DatablockResult, DecodePolicy, RecordResult};
pub use asterix_schema::{CategoryRegistry, SchemaError};

use std::collections::HashMap;

/// Loads and validates a registry from one or more XML schema sources,
/// keeping every category that parsed cleanly and returning every
/// [`SchemaError`] across all of them (spec §4.7).
pub fn load_registry<'a>(xml_sources: impl IntoIterator<Item = &'a str>) -> (CategoryRegistry, Vec<SchemaError>) {
    let (categories, errors) = asterix_schema::load_all(xml_sources);
    (CategoryRegistry::from_categories(categories), errors)
}

/// Convenience wrapper kept for call sites that only ever decode with the
/// default policy and no pinned editions.
pub fn decode_datablock_default(bytes: &[u8], registry: &CategoryRegistry) -> DatablockResult {
    decode_datablock(bytes, registry, &DecodePolicy::default(), &HashMap::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAT1_XML: &str = r#"
        <category id="1">
          <edition tag="1.0">
            <uap><slot frn="1" item="010"/></uap>
            <item id="010" name="Data Source Id" rule="mandatory">
              <fixed bytes="1"><field name="sic" bits="8" codec="unsigned"/></fixed>
            </item>
          </edition>
        </category>
    "#;

    #[test]
    fn load_and_decode_round_trip() {
        let (registry, errors) = load_registry([CAT1_XML]);
        assert!(errors.is_empty());
        let bytes = [1, 0x00, 0x05, 0x80, 0x2A];
        let result = decode_datablock_default(&bytes, &registry);
        assert!(result.errors.is_empty());
        assert_eq!(result.records.len(), 1);
    }
}
