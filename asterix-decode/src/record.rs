//! `RecordDecoder` (spec §4.5, component C5): decodes one FSPEC-prefixed
//! record against a selected edition's UAP, in FSPEC slot order.

use std::collections::BTreeMap;

use asterix_core::cursor::BitCursor;
use asterix_core::error::{DecodeError, ErrorKind};
use asterix_core::value::DecodedItem;
use asterix_schema::model::{Edition, UapSlot};

use crate::item::decode_item;
use crate::policy::{DecodePolicy, OnUnknownItem};

#[derive(Debug, Clone)]
pub struct RecordResult {
    pub items: BTreeMap<String, DecodedItem>,
    pub errors: Vec<DecodeError>,
    /// `false` once an item's true wire length became unknowable; the
    /// framer must not attempt to locate a following record in that case.
    pub boundary_certain: bool,
    /// Bytes consumed from `cursor`'s starting position, including the
    /// FSPEC (spec §6's `RecordResult{ bytes_consumed }`; P5: this equals
    /// FSPEC length plus the sum of decoded items' byte lengths, and no
    /// byte in the record is read twice because the cursor only advances).
    pub bytes_consumed: usize,
}

/// Decodes one record starting at `cursor`'s current position.
///
/// `byte_offset_base` is added to the cursor's own byte count to produce
/// absolute offsets for [`DecodeError`] (spec §4.8: errors carry an
/// absolute byte offset, not one relative to the current record).
pub fn decode_record(cursor: &mut BitCursor, edition: &Edition, policy: &DecodePolicy, category: u8, byte_offset_base: usize) -> RecordResult {
    let start = cursor.bytes_consumed();
    let mut items = BTreeMap::new();
    let mut errors = Vec::new();

    let presence = match crate::fspec::read_fspec(cursor, policy.max_fspec_bytes) {
        Ok(slots) => slots,
        Err(kind) => {
            let boundary_certain = !kind.is_unrecoverable();
            errors.push(DecodeError::new(kind, byte_offset_base + cursor.bytes_consumed()).with_category(category));
            return RecordResult { items, errors, boundary_certain, bytes_consumed: cursor.bytes_consumed() - start };
        }
    };

    for (slot_index, present) in presence.iter().enumerate() {
        if !present {
            continue;
        }
        if errors.len() >= policy.max_errors_per_record && policy.max_errors_per_record > 0 {
            break;
        }

        let slot = edition.uap.slots.get(slot_index);
        match slot {
            Some(UapSlot::Spare) => continue,
            Some(UapSlot::Item(item_id)) => {
                let Some(item_def) = edition.item(item_id) else {
                    // The loader validates every UAP item reference against
                    // the edition's item table, so this should not happen;
                    // treat it as the record-unrecoverable case it would be.
                    errors.push(
                        DecodeError::new(ErrorKind::UnknownItem { slot: slot_index as u32 + 1 }, byte_offset_base + cursor.bytes_consumed())
                            .with_category(category),
                    );
                    return RecordResult { items, errors, boundary_certain: false, bytes_consumed: cursor.bytes_consumed() - start };
                };
                let outcome = decode_item(cursor, item_def, policy, 0);
                match outcome.result {
                    Ok(decoded) => {
                        items.insert(item_def.id.clone(), decoded);
                    }
                    Err(kind) => {
                        let unrecoverable = kind.is_unrecoverable() || !outcome.boundary_certain;
                        errors.push(
                            DecodeError::new(kind, byte_offset_base + cursor.bytes_consumed())
                                .with_category(category)
                                .with_item(item_def.id.clone()),
                        );
                        let boundary_certain = !unrecoverable;
                        // a boundary-certain item error (ran out of bytes at
                        // end of input) still ends this record: there is
                        // nothing left to read for later slots either.
                        return RecordResult { items, errors, boundary_certain, bytes_consumed: cursor.bytes_consumed() - start };
                    }
                }
            }
            None => {
                errors.push(
                    DecodeError::new(ErrorKind::UnknownItem { slot: slot_index as u32 + 1 }, byte_offset_base + cursor.bytes_consumed())
                        .with_category(category),
                );
                match policy.on_unknown_item {
                    OnUnknownItem::ReportAndContinue => {
                        return RecordResult { items, errors, boundary_certain: false, bytes_consumed: cursor.bytes_consumed() - start }
                    }
                    OnUnknownItem::Fail => {
                        return RecordResult {
                            items: BTreeMap::new(),
                            errors,
                            boundary_certain: false,
                            bytes_consumed: cursor.bytes_consumed() - start,
                        }
                    }
                }
            }
        }
    }

    RecordResult { items, errors, boundary_certain: true, bytes_consumed: cursor.bytes_consumed() - start }
}
