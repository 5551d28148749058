use std::collections::BTreeMap;

/// A decoded scalar value (spec §4.2 / §9 "duck-typed value output → typed
/// union"). Rational values keep the exact numerator/denominator so
/// conformance tests can compare bit-for-bit instead of through floating
/// point.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Unsigned(u64),
    Signed(i64),
    /// Octal re-grouping of the raw bits, spec §4.2 example: raw
    /// `0b111111000000` (12 bits) becomes `7700`.
    Octal(u32),
    Rational { raw: i64, scale_num: i64, scale_den: i64 },
    Text(String),
    Bytes(Vec<u8>),
}

impl Value {
    /// Presentation-only floating point view of a rational value.
    /// Returns `None` for non-rational variants.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Rational { raw, scale_num, scale_den } => {
                Some(*raw as f64 * *scale_num as f64 / *scale_den as f64)
            }
            Value::Unsigned(v) => Some(*v as f64),
            Value::Signed(v) => Some(*v as f64),
            _ => None,
        }
    }
}

/// Trims the trailing spaces an [`crate::codec::CodecKind::Icao6Bit`]
/// decode retains (spec §4.2: "trailing spaces retained but flagged for
/// easy trimming").
pub fn icao6_trim(s: &str) -> &str {
    s.trim_end_matches(' ')
}

/// A decoded data item, a tagged tree mirroring the schema (spec §3).
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedItem {
    Scalar { id: String, value: Value },
    Group { id: String, fields: BTreeMap<String, Value> },
    List { id: String, elements: Vec<BTreeMap<String, Value>> },
    Extended { id: String, parts: Vec<BTreeMap<String, Value>> },
    Nested { id: String, children: BTreeMap<String, DecodedItem> },
    Opaque { id: String, bytes: Vec<u8>, nested: Option<Box<DecodedItem>>, nested_error: Option<String> },
}

impl DecodedItem {
    pub fn id(&self) -> &str {
        match self {
            DecodedItem::Scalar { id, .. }
            | DecodedItem::Group { id, .. }
            | DecodedItem::List { id, .. }
            | DecodedItem::Extended { id, .. }
            | DecodedItem::Nested { id, .. }
            | DecodedItem::Opaque { id, .. } => id,
        }
    }
}
