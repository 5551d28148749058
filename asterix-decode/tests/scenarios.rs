//! End-to-end decode scenarios against the minimal CAT048/CAT021 fixtures
//! under `testdata/`, one per documented seed scenario.

use std::collections::HashMap;

use asterix_core::error::ErrorKind;
use asterix_core::value::{DecodedItem, Value};
use asterix_decode::{decode_datablock, decode_record, fspec, DecodePolicy};
use asterix_schema::registry::CategoryRegistry;

fn cat048_registry() -> CategoryRegistry {
    let xml = test_utils::load_fixture("valid/cat048_mini.xml");
    let category = asterix_schema::load_str(&xml).expect("cat048_mini.xml should be a valid schema");
    CategoryRegistry::from_categories([category])
}

fn cat021_registry() -> CategoryRegistry {
    let xml = test_utils::load_fixture("valid/cat021_mini.xml");
    let category = asterix_schema::load_str(&xml).expect("cat021_mini.xml should be a valid schema");
    CategoryRegistry::from_categories([category])
}

/// S1: minimal target report, FRN1-3 present, nothing else.
#[test]
fn s1_minimal_target_report() {
    let registry = cat048_registry();
    let bytes = test_utils::hex_bytes("30 00 0A E0 19 C9 35 6D 4B 00");
    let result = decode_datablock(&bytes, &registry, &DecodePolicy::default(), &HashMap::new());
    assert!(result.errors.is_empty());
    assert_eq!(result.records.len(), 1);
    let record = &result.records[0];
    assert!(record.errors.is_empty());
    assert_eq!(record.items.len(), 3);

    match &record.items["010"] {
        DecodedItem::Group { fields, .. } => {
            assert_eq!(fields["sac"], Value::Unsigned(0x19));
            assert_eq!(fields["sic"], Value::Unsigned(0xC9));
        }
        other => panic!("expected Group, got {other:?}"),
    }
    match &record.items["140"] {
        DecodedItem::Scalar { value, .. } => {
            assert_eq!(*value, Value::Rational { raw: 3_501_899, scale_num: 1, scale_den: 128 });
        }
        other => panic!("expected Scalar, got {other:?}"),
    }
    match &record.items["020"] {
        DecodedItem::Extended { parts, .. } => assert_eq!(parts.len(), 1),
        other => panic!("expected Extended, got {other:?}"),
    }
}

/// S2: a 3-byte FSPEC extension whose data bits are all clear still
/// consumes all 3 bytes.
#[test]
fn s2_fspec_extension_with_no_data_bits_set() {
    let mut cursor = asterix_core::cursor::BitCursor::from_slice(&test_utils::hex_bytes("01 01 00"));
    let slots = fspec::read_fspec(&mut cursor, 8).unwrap();
    assert_eq!(slots.len(), 21);
    assert!(slots.iter().all(|&s| !s));
    assert_eq!(cursor.bytes_consumed(), 3);
}

/// S3: a two-part Variable extension chain.
#[test]
fn s3_variable_extension_chain_of_two_parts() {
    let registry = cat048_registry();
    let edition = registry.get(48).unwrap().latest_edition().unwrap();
    // FSPEC: only FRN4 (170) present -> byte = 0b0001000_0 = 0x10.
    let bytes = test_utils::hex_bytes("10 01 00");
    let mut cursor = asterix_core::cursor::BitCursor::from_slice(&bytes);
    let result = decode_record(&mut cursor, edition, &DecodePolicy::default(), 48, 3);
    assert!(result.errors.is_empty());
    match &result.items["170"] {
        DecodedItem::Extended { parts, .. } => assert_eq!(parts.len(), 2),
        other => panic!("expected Extended, got {other:?}"),
    }
}

/// S4: Repetitive with REP=2 renders two 8-byte elements.
#[test]
fn s4_repetitive_with_rep_2() {
    let registry = cat048_registry();
    let edition = registry.get(48).unwrap().latest_edition().unwrap();
    // FSPEC: only FRN5 (250) present -> byte = 0b0000100_0 = 0x08.
    let mut bytes = test_utils::hex_bytes("08");
    bytes.extend(test_utils::hex_bytes("02 AA AA AA AA AA AA AA AA BB BB BB BB BB BB BB BB"));
    let mut cursor = asterix_core::cursor::BitCursor::from_slice(&bytes);
    let result = decode_record(&mut cursor, edition, &DecodePolicy::default(), 48, 3);
    assert!(result.errors.is_empty());
    match &result.items["250"] {
        DecodedItem::List { elements, .. } => assert_eq!(elements.len(), 2),
        other => panic!("expected List, got {other:?}"),
    }
}

/// S5: Compound item with one present sub-field.
#[test]
fn s5_compound_with_sub_fspec() {
    let registry = cat048_registry();
    let edition = registry.get(48).unwrap().latest_edition().unwrap();
    // FSPEC: only FRN6 (120) present -> byte = 0b0000010_0 = 0x04.
    let bytes = test_utils::hex_bytes("04 80 FE");
    let mut cursor = asterix_core::cursor::BitCursor::from_slice(&bytes);
    let result = decode_record(&mut cursor, edition, &DecodePolicy::default(), 48, 3);
    assert!(result.errors.is_empty());
    match &result.items["120"] {
        DecodedItem::Nested { children, .. } => {
            match &children["120/1"] {
                DecodedItem::Scalar { value, .. } => assert_eq!(*value, Value::Signed(-2)),
                other => panic!("expected Scalar, got {other:?}"),
            }
        }
        other => panic!("expected Nested, got {other:?}"),
    }
}

/// S6: a Fixed item truncated at the true end of the record's bytes stays
/// item-scoped and recoverable — the record completes with the item
/// missing and the datablock is not otherwise disturbed.
#[test]
fn s6_truncated_fixed_item_at_end_of_record() {
    let registry = cat021_registry();
    // FSPEC: FRN1 (131) present, FX=0 -> 0x80. Then only 7 of the 8 declared bytes.
    let bytes = test_utils::hex_bytes("15 00 0B 80 01 02 03 04 05 06 07");
    let result = decode_datablock(&bytes, &registry, &DecodePolicy::default(), &HashMap::new());
    assert!(result.errors.is_empty(), "datablock-level errors: {:?}", result.errors);
    assert_eq!(result.records.len(), 1);
    let record = &result.records[0];
    assert!(record.items.is_empty());
    assert_eq!(record.errors.len(), 1);
    assert!(matches!(record.errors[0].kind, ErrorKind::Truncated { .. }));
    assert!(record.boundary_certain);
}
