//! `DatablockFramer` (spec §4.6, component C6): splits one ASTERIX
//! datablock (`CAT` + `LEN` header followed by back-to-back records) from
//! its enclosing buffer and drives [`crate::record::decode_record`] across
//! it.

use std::collections::HashMap;

use asterix_core::cursor::BitCursor;
use asterix_core::error::{DecodeError, ErrorKind};
use asterix_schema::registry::CategoryRegistry;

use crate::policy::{DecodePolicy, EditionPolicy, OnTrailingBytes};
use crate::record::{decode_record, RecordResult};

#[derive(Debug, Clone)]
pub struct DatablockResult {
    pub category: u8,
    pub edition_tag: Option<String>,
    pub records: Vec<RecordResult>,
    pub errors: Vec<DecodeError>,
    /// Total bytes the datablock's own `LEN` field declared (header + body).
    pub declared_length: usize,
}

/// Decodes one datablock starting at the beginning of `bytes`.
///
/// `edition_overrides` pins an explicit edition tag for a category when
/// `policy.edition_policy` is [`EditionPolicy::Exact`]; it is ignored under
/// [`EditionPolicy::Latest`].
pub fn decode_datablock(
    bytes: &[u8],
    registry: &CategoryRegistry,
    policy: &DecodePolicy,
    edition_overrides: &HashMap<u8, String>,
) -> DatablockResult {
    if bytes.len() < 3 {
        return DatablockResult {
            category: bytes.first().copied().unwrap_or(0),
            edition_tag: None,
            records: Vec::new(),
            errors: vec![DecodeError::new(ErrorKind::ShortDatablock { have: bytes.len() }, 0)],
            declared_length: 0,
        };
    }

    let category = bytes[0];
    let declared_length = u16::from_be_bytes([bytes[1], bytes[2]]) as usize;

    if declared_length < 3 || declared_length > bytes.len() {
        return DatablockResult {
            category,
            edition_tag: None,
            records: Vec::new(),
            errors: vec![DecodeError::new(ErrorKind::LengthMismatch { declared: declared_length as u16, remaining: bytes.len() }, 0)
                .with_category(category)],
            declared_length,
        };
    }

    let Some(schema_category) = registry.get(category) else {
        return DatablockResult {
            category,
            edition_tag: None,
            records: Vec::new(),
            errors: vec![DecodeError::new(ErrorKind::UnsupportedCategory { category }, 0)],
            declared_length,
        };
    };

    let edition = match policy.edition_policy {
        EditionPolicy::Latest => schema_category.latest_edition(),
        EditionPolicy::Exact => {
            let tag = edition_overrides.get(&category);
            tag.and_then(|tag| schema_category.edition(tag))
        }
    };

    let Some(edition) = edition else {
        let requested = match policy.edition_policy {
            EditionPolicy::Exact => edition_overrides.get(&category).cloned().unwrap_or_else(|| "<unspecified>".into()),
            EditionPolicy::Latest => "<none>".into(),
        };
        return DatablockResult {
            category,
            edition_tag: None,
            records: Vec::new(),
            errors: vec![DecodeError::new(ErrorKind::UnsupportedEdition { category, edition: requested }, 0).with_category(category)],
            declared_length,
        };
    };

    let body = &bytes[3..declared_length];
    let mut cursor = BitCursor::from_slice(body);
    let mut records = Vec::new();
    let mut errors = Vec::new();

    while cursor.remaining_bits() > 0 {
        if cursor.remaining_bits() < 8 {
            match policy.on_trailing_bytes {
                OnTrailingBytes::Report => {
                    errors.push(
                        DecodeError::new(ErrorKind::TrailingBytes { count: cursor.remaining_bytes() }, 3 + cursor.bytes_consumed())
                            .with_category(category),
                    );
                }
                OnTrailingBytes::Ignore => {}
            }
            break;
        }

        let before = cursor.bytes_consumed();
        let result = decode_record(&mut cursor, edition, policy, category, 3);

        if result.items.is_empty() && result.errors.len() == 1 {
            if let ErrorKind::Truncated { have_bits, .. } = result.errors[0].kind {
                if have_bits < 8 {
                    match policy.on_trailing_bytes {
                        OnTrailingBytes::Report => errors.push(
                            DecodeError::new(
                                ErrorKind::TrailingBytes { count: cursor.remaining_bytes() + (cursor.bytes_consumed() - before) },
                                3 + before,
                            )
                            .with_category(category),
                        ),
                        OnTrailingBytes::Ignore => {}
                    }
                    break;
                }
            }
        }

        let boundary_certain = result.boundary_certain;
        let made_progress = cursor.bytes_consumed() > before;
        records.push(result);

        if !boundary_certain {
            errors.push(
                DecodeError::new(ErrorKind::Unrecoverable { reason: "record boundary lost; remaining datablock bytes undecoded" }, 3 + cursor.bytes_consumed())
                    .with_category(category),
            );
            break;
        }
        if !made_progress {
            break;
        }
    }

    DatablockResult { category, edition_tag: Some(edition.tag.clone()), records, errors, declared_length }
}
