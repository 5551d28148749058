//! Property-based tests for the testable properties a DO-278A AL-3 decode
//! core must hold regardless of which schema drives it.

use std::collections::HashMap;

use asterix_core::cursor::BitCursor;
use asterix_core::value::DecodedItem;
use asterix_decode::{decode_datablock, decode_record, fspec, DecodePolicy};
use asterix_schema::model::{BitField, Category, Edition, ItemDef, ItemFormat, Rule, Uap, UapSlot};
use asterix_schema::registry::CategoryRegistry;
use proptest::prelude::*;
use test_utils::BitVecBuilder;

fn single_fixed_item_registry(byte_length: usize) -> CategoryRegistry {
    let fields: Vec<BitField> = (0..byte_length)
        .map(|i| BitField {
            name: format!("f{i}"),
            width_bits: 8,
            codec: asterix_core::codec::CodecKind::Unsigned,
            unit: None,
            is_spare: false,
        })
        .collect();
    let edition = Edition {
        tag: "1.0".into(),
        uap: Uap { slots: vec![UapSlot::Item("010".into())] },
        items: vec![ItemDef { id: "010".into(), name: "x".into(), rule: Rule::Mandatory, format: ItemFormat::Fixed { byte_length, fields } }],
    };
    CategoryRegistry::from_categories([Category { id: 1, editions: vec![edition] }])
}

proptest! {
    /// P1: FSPEC round-trip — setting exactly bits in S decodes back to S
    /// in ascending slot order.
    #[test]
    fn p1_fspec_round_trip(present in prop::collection::vec(any::<bool>(), 1..=20)) {
        let mut builder = BitVecBuilder::new();
        let mut slot = 0usize;
        while slot < present.len() {
            let chunk_end = (slot + 7).min(present.len());
            for i in slot..chunk_end {
                builder.push_bits(present[i] as u64, 1);
            }
            for _ in chunk_end..slot + 7 {
                builder.push_bits(0, 1);
            }
            let more = chunk_end < present.len();
            builder.push_bits(more as u64, 1);
            slot = chunk_end;
        }
        let bytes = builder.finish();
        let mut cursor = BitCursor::from_slice(&bytes);
        let decoded = fspec::read_fspec(&mut cursor, 16).unwrap();
        for (i, &want) in present.iter().enumerate() {
            prop_assert_eq!(decoded[i], want);
        }
    }

    /// P3: a truncated Fixed item never contributes a partial value — the
    /// record's item map simply omits it.
    #[test]
    fn p3_no_partial_commits_on_truncation(byte_length in 1usize..8, available in 0usize..8) {
        let registry = single_fixed_item_registry(byte_length);
        let edition = registry.get(1).unwrap().latest_edition().unwrap();
        let available = available.min(byte_length.saturating_sub(1));
        let mut bytes = vec![0x80u8]; // FSPEC: slot1 present, FX=0
        bytes.extend(std::iter::repeat(0xAAu8).take(available));
        let mut cursor = BitCursor::from_slice(&bytes);
        let result = decode_record(&mut cursor, edition, &DecodePolicy::default(), 1, 3);
        prop_assert!(!result.items.contains_key("010"));
    }

    /// P4: decoding the same bytes twice yields the same result.
    #[test]
    fn p4_decode_is_idempotent(sac in any::<u8>(), sic in any::<u8>()) {
        let registry = single_fixed_item_registry(2);
        let edition = registry.get(1).unwrap().latest_edition().unwrap();
        let bytes = [0x80u8, sac, sic];
        let mut c1 = BitCursor::from_slice(&bytes);
        let mut c2 = BitCursor::from_slice(&bytes);
        let r1 = decode_record(&mut c1, edition, &DecodePolicy::default(), 1, 3);
        let r2 = decode_record(&mut c2, edition, &DecodePolicy::default(), 1, 3);
        prop_assert_eq!(r1.items, r2.items);
        prop_assert_eq!(r1.errors, r2.errors);
    }

    /// P6: two's-complement boundary values for arbitrary widths.
    #[test]
    fn p6_twos_complement_boundaries(width in 2u32..=32) {
        use asterix_core::codec::{decode_field, CodecKind};
        use asterix_core::value::Value;
        let min_raw = 1u64 << (width - 1);
        let max_raw = min_raw - 1;
        prop_assert_eq!(
            decode_field(&CodecKind::TwosComplement, min_raw, width),
            Value::Signed(-(1i64 << (width - 1)))
        );
        prop_assert_eq!(
            decode_field(&CodecKind::TwosComplement, max_raw, width),
            Value::Signed((1i64 << (width - 1)) - 1)
        );
    }
}

/// P5: for a successful decode, `bytes_consumed` equals the FSPEC length
/// plus the declared byte length of every present item, with no error and
/// no overrun of the buffer handed to the cursor.
#[test]
fn p5_byte_accounting_matches_fspec_plus_item_lengths() {
    let registry = single_fixed_item_registry(3);
    let edition = registry.get(1).unwrap().latest_edition().unwrap();
    let bytes = [0x80u8, 0x01, 0x02, 0x03, 0xFF]; // one trailing byte past the record.
    let mut cursor = BitCursor::from_slice(&bytes);
    let result = decode_record(&mut cursor, edition, &DecodePolicy::default(), 1, 0);
    assert!(result.errors.is_empty());
    // 1 FSPEC byte + 3-byte Fixed item.
    assert_eq!(result.bytes_consumed, 4);
    assert_eq!(cursor.bytes_consumed(), 4);
}

/// P7: Repetitive with REP=0 decodes to an empty List with no error.
#[test]
fn p7_repetitive_rep_zero_is_empty_list_no_error() {
    let edition = Edition {
        tag: "1.0".into(),
        uap: Uap { slots: vec![UapSlot::Item("161".into())] },
        items: vec![ItemDef {
            id: "161".into(),
            name: "Track Number".into(),
            rule: Rule::Optional,
            format: ItemFormat::Repetitive {
                element_byte_length: 1,
                fields: vec![BitField { name: "n".into(), width_bits: 8, codec: asterix_core::codec::CodecKind::Unsigned, unit: None, is_spare: false }],
            },
        }],
    };
    let bytes = [0x80u8, 0x00]; // FSPEC slot1 present, REP=0
    let mut cursor = BitCursor::from_slice(&bytes);
    let result = decode_record(&mut cursor, &edition, &DecodePolicy::default(), 1, 3);
    assert!(result.errors.is_empty());
    match &result.items["161"] {
        DecodedItem::List { elements, .. } => assert!(elements.is_empty()),
        other => panic!("expected List, got {other:?}"),
    }
}

/// P8: Explicit with LEN=1 (LEN byte only) decodes to empty opaque bytes.
#[test]
fn p8_explicit_len_one_is_empty_opaque() {
    let edition = Edition {
        tag: "1.0".into(),
        uap: Uap { slots: vec![UapSlot::Item("RE".into())] },
        items: vec![ItemDef {
            id: "RE".into(),
            name: "Reserved Expansion".into(),
            rule: Rule::Optional,
            format: ItemFormat::Explicit { nested: None },
        }],
    };
    let bytes = [0x80u8, 0x01]; // FSPEC slot1 present, LEN=1
    let mut cursor = BitCursor::from_slice(&bytes);
    let result = decode_record(&mut cursor, &edition, &DecodePolicy::default(), 1, 3);
    assert!(result.errors.is_empty());
    match &result.items["RE"] {
        DecodedItem::Opaque { bytes, .. } => assert!(bytes.is_empty()),
        other => panic!("expected Opaque, got {other:?}"),
    }
}

/// P9: decoding the concatenation of two well-formed datablocks yields the
/// same records as decoding each separately.
#[test]
fn p9_datablock_concatenation_matches_sequential_decode() {
    let registry = single_fixed_item_registry(1);
    let a = [1u8, 0x00, 0x05, 0x80, 0x2A];
    let b = [1u8, 0x00, 0x05, 0x80, 0x2B];
    let mut both = a.to_vec();
    both.extend_from_slice(&b);

    let combined = asterix_decode::decode_stream(&both, &registry, &DecodePolicy::default(), &HashMap::new());
    let sep_a = decode_datablock(&a, &registry, &DecodePolicy::default(), &HashMap::new());
    let sep_b = decode_datablock(&b, &registry, &DecodePolicy::default(), &HashMap::new());

    assert_eq!(combined.len(), 2);
    assert_eq!(format!("{:?}", combined[0].records), format!("{:?}", sep_a.records));
    assert_eq!(format!("{:?}", combined[1].records), format!("{:?}", sep_b.records));
}
