//! # asterix-decode
//!
//! The runtime half of the decoder: the FSPEC engine, the five item-format
//! decoders, the per-record state machine, the datablock framer and the
//! error reporter, all driven by an [`asterix_schema::registry::CategoryRegistry`]
//! rather than by generated per-category code.

use std::collections::HashMap;

pub mod fspec;
pub mod framer;
pub mod item;
pub mod policy;
pub mod record;
pub mod reporter;

pub use framer::{decode_datablock, DatablockResult};
pub use policy::{DecodePolicy, EditionPolicy, OnTrailingBytes, OnUnknownItem};
pub use record::{decode_record, RecordResult};
pub use reporter::ErrorReporter;

/// Decodes every back-to-back datablock in `bytes` until the buffer is
/// exhausted (spec §4.6: a stream is just datablocks one after another).
pub fn decode_stream(
    bytes: &[u8],
    registry: &asterix_schema::registry::CategoryRegistry,
    policy: &DecodePolicy,
    edition_overrides: &HashMap<u8, String>,
) -> Vec<DatablockResult> {
    let mut offset = 0;
    let mut results = Vec::new();
    while offset < bytes.len() {
        let result = decode_datablock(&bytes[offset..], registry, policy, edition_overrides);
        let consumed = result.declared_length.max(1);
        results.push(result);
        offset += consumed;
    }
    results
}
