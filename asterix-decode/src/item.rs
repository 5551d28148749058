//! `ItemFormat` decoding (spec §4.3, component C3): turns one FSPEC-present
//! item's bytes into a [`DecodedItem`], for each of the five shapes a
//! schema item can take.

use std::collections::BTreeMap;

use asterix_core::codec::decode_field;
use asterix_core::cursor::BitCursor;
use asterix_core::error::ErrorKind;
use asterix_core::value::{DecodedItem, Value};
use asterix_schema::model::{BitField, ItemDef, ItemFormat};

use crate::policy::DecodePolicy;

/// Outcome of decoding one item: either the fully decoded value, or a
/// classified error. The cursor is always left past the bytes the format
/// determined the item occupies, `boundary_certain` reflects whether that
/// length determination itself is trustworthy (see [`crate::record`]).
pub struct ItemOutcome {
    pub result: Result<DecodedItem, ErrorKind>,
    /// `false` when the format's own length bookkeeping became unreliable
    /// (e.g. a `Variable` FX chain truncated mid-part) — the caller cannot
    /// assume the cursor sits at a item boundary at all.
    pub boundary_certain: bool,
}

fn ok(item: DecodedItem) -> ItemOutcome {
    ItemOutcome { result: Ok(item), boundary_certain: true }
}

fn err(kind: ErrorKind, boundary_certain: bool) -> ItemOutcome {
    ItemOutcome { result: Err(kind), boundary_certain }
}

fn read_fields(cursor: &mut BitCursor, fields: &[BitField]) -> Result<BTreeMap<String, Value>, ErrorKind> {
    let mut out = BTreeMap::new();
    for field in fields {
        let raw = cursor.read_bits_be(field.width_bits)?;
        if field.is_spare {
            continue;
        }
        out.insert(field.name.clone(), decode_field(&field.codec, raw, field.width_bits));
    }
    Ok(out)
}

/// Decodes one item per its schema format.
pub fn decode_item(cursor: &mut BitCursor, item_def: &ItemDef, policy: &DecodePolicy, depth: u32) -> ItemOutcome {
    match &item_def.format {
        ItemFormat::Fixed { byte_length, fields } => decode_fixed(cursor, &item_def.id, *byte_length, fields),
        ItemFormat::Variable { parts } => decode_variable(cursor, &item_def.id, parts, policy),
        ItemFormat::Repetitive { element_byte_length, fields } => {
            decode_repetitive(cursor, &item_def.id, *element_byte_length, fields)
        }
        ItemFormat::Compound { sub_items } => decode_compound(cursor, &item_def.id, sub_items, policy, depth),
        ItemFormat::Explicit { nested } => decode_explicit(cursor, &item_def.id, nested.as_deref(), policy, depth),
    }
}

fn decode_fixed(cursor: &mut BitCursor, id: &str, byte_length: usize, fields: &[BitField]) -> ItemOutcome {
    let start_bits = cursor.remaining_bits();
    if start_bits < byte_length * 8 {
        // The item's length is fully known from the schema even though it
        // wasn't met; consume the rest of the buffer so the record ends at
        // the true end of input instead of leaving partial item bytes for
        // the framer to misread as the start of another record.
        cursor.skip_to_end();
        return err(
            ErrorKind::Truncated { need_bits: (byte_length * 8) as u32, have_bits: start_bits as u32 },
            true,
        );
    }
    match read_fields(cursor, fields) {
        Ok(mut values) => {
            if fields.len() == 1 && !fields[0].is_spare {
                let value = values.remove(&fields[0].name).expect("single non-spare field always decodes a value");
                ok(DecodedItem::Scalar { id: id.to_string(), value })
            } else {
                ok(DecodedItem::Group { id: id.to_string(), fields: values })
            }
        }
        Err(kind) => err(kind, true),
    }
}

fn decode_variable(cursor: &mut BitCursor, id: &str, parts: &[asterix_schema::model::VariablePart], policy: &DecodePolicy) -> ItemOutcome {
    let mut rendered_parts = Vec::new();
    for (index, part) in parts.iter().enumerate() {
        if index >= policy.max_variable_parts {
            return err(ErrorKind::ExtensionOverflow { max_parts: policy.max_variable_parts }, false);
        }
        if cursor.remaining_bits() < part.byte_length * 8 {
            return err(
                ErrorKind::Truncated { need_bits: (part.byte_length * 8) as u32, have_bits: cursor.remaining_bits() as u32 },
                false,
            );
        }
        let values = match read_fields(cursor, &part.fields) {
            Ok(v) => v,
            Err(kind) => return err(kind, false),
        };
        let fx = match cursor.read_bits_be(1) {
            Ok(bit) => bit == 1,
            Err(e) => return err(e.into(), false),
        };
        rendered_parts.push(values);
        if !fx {
            return ok(DecodedItem::Extended { id: id.to_string(), parts: rendered_parts });
        }
    }
    // FX was still set after the schema's last declared part: the schema
    // doesn't cover a continuation the wire actually used.
    err(ErrorKind::ExtensionOverflow { max_parts: policy.max_variable_parts }, false)
}

fn decode_repetitive(cursor: &mut BitCursor, id: &str, element_byte_length: usize, fields: &[BitField]) -> ItemOutcome {
    let rep = match cursor.read_bits_be(8) {
        Ok(v) => v as u32,
        Err(e) => return err(e.into(), true),
    };
    let needed_bytes = rep as usize * element_byte_length;
    if cursor.remaining_bytes() < needed_bytes {
        return err(
            ErrorKind::RepetitiveOverflow { rep, needed_bytes, remaining_bytes: cursor.remaining_bytes() },
            false,
        );
    }
    let mut elements = Vec::with_capacity(rep as usize);
    for _ in 0..rep {
        match read_fields(cursor, fields) {
            Ok(values) => elements.push(values),
            Err(kind) => return err(kind, false),
        }
    }
    ok(DecodedItem::List { id: id.to_string(), elements })
}

fn decode_compound(
    cursor: &mut BitCursor,
    id: &str,
    sub_items: &[ItemDef],
    policy: &DecodePolicy,
    depth: u32,
) -> ItemOutcome {
    if depth >= policy.max_compound_depth {
        return err(ErrorKind::CompoundDepthExceeded { max_depth: policy.max_compound_depth }, false);
    }
    let presence = match crate::fspec::read_fspec(cursor, policy.max_fspec_bytes) {
        Ok(slots) => slots,
        Err(kind) => return err(kind, false),
    };
    let mut children = BTreeMap::new();
    for (slot_index, present) in presence.iter().enumerate() {
        if !present {
            continue;
        }
        let Some(sub_item) = sub_items.get(slot_index) else {
            match policy.on_unknown_item {
                crate::policy::OnUnknownItem::ReportAndContinue => continue,
                crate::policy::OnUnknownItem::Fail => {
                    return err(ErrorKind::UnknownItem { slot: slot_index as u32 + 1 }, false);
                }
            }
        };
        let outcome = decode_item(cursor, sub_item, policy, depth + 1);
        match outcome.result {
            Ok(decoded) => {
                children.insert(sub_item.id.clone(), decoded);
            }
            Err(kind) => return err(kind, outcome.boundary_certain),
        }
    }
    ok(DecodedItem::Nested { id: id.to_string(), children })
}

fn decode_explicit(
    cursor: &mut BitCursor,
    id: &str,
    nested: Option<&ItemFormat>,
    policy: &DecodePolicy,
    depth: u32,
) -> ItemOutcome {
    let len = match cursor.read_bits_be(8) {
        Ok(v) => v as u8,
        Err(e) => return err(e.into(), true),
    };
    if len == 0 {
        return err(ErrorKind::ExplicitLenInvalid { len }, true);
    }
    let body_len = len as usize - 1;
    if cursor.remaining_bytes() < body_len {
        return err(
            ErrorKind::Truncated { need_bits: (body_len * 8) as u32, have_bits: cursor.remaining_bits() as u32 },
            false,
        );
    }
    let bytes = match cursor.read_bytes(body_len) {
        Ok(b) => b.to_vec(),
        Err(e) => return err(e.into(), false),
    };

    let (nested_item, nested_error) = match nested {
        None => (None, None),
        Some(format) => {
            let nested_def = ItemDef {
                id: format!("{id}/explicit"),
                name: String::new(),
                rule: asterix_schema::model::Rule::Mandatory,
                format: format.clone(),
            };
            let mut nested_cursor = BitCursor::from_slice(&bytes);
            let outcome = decode_item(&mut nested_cursor, &nested_def, policy, depth + 1);
            match outcome.result {
                Ok(decoded) => (Some(Box::new(decoded)), None),
                Err(kind) => (None, Some(kind.to_string())),
            }
        }
    };

    ok(DecodedItem::Opaque { id: id.to_string(), bytes, nested: nested_item, nested_error })
}
