use std::fmt;

/// Everything that can be wrong with a schema source (spec §4.7, §9
/// "exhaustive, not best-effort"). `SchemaLoader` accumulates every
/// violation it finds in a source rather than stopping at the first, so a
/// schema author sees the whole list of problems in one pass.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    Xml { message: String },
    DuplicateCategory { category: u8 },
    DuplicateEdition { category: u8, edition: String },
    DuplicateItemId { category: u8, edition: String, item_id: String },
    DuplicateUapSlot { category: u8, edition: String, frn: u32 },
    UnknownUapItemRef { category: u8, edition: String, frn: u32, item_id: String },
    FixedWidthMismatch { item_id: String, declared_bytes: usize, field_bits: u32 },
    VariablePartWidthMismatch { item_id: String, part_index: usize, declared_bytes: usize, field_bits: u32 },
    RepetitiveElementEmpty { item_id: String },
    CompoundEmpty { item_id: String },
    EmptyUap { category: u8, edition: String },
    InvalidCodec { item_id: String, field: String, message: String },
    ZeroWidthField { item_id: String, field: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::Xml { message } => write!(f, "XML parse error: {message}"),
            SchemaError::DuplicateCategory { category } => write!(f, "category {category} declared more than once"),
            SchemaError::DuplicateEdition { category, edition } => {
                write!(f, "category {category} edition {edition} declared more than once")
            }
            SchemaError::DuplicateItemId { category, edition, item_id } => {
                write!(f, "category {category} edition {edition}: item {item_id} declared more than once")
            }
            SchemaError::DuplicateUapSlot { category, edition, frn } => {
                write!(f, "category {category} edition {edition}: UAP slot {frn} declared more than once")
            }
            SchemaError::UnknownUapItemRef { category, edition, frn, item_id } => write!(
                f,
                "category {category} edition {edition}: UAP slot {frn} references undeclared item {item_id}"
            ),
            SchemaError::FixedWidthMismatch { item_id, declared_bytes, field_bits } => write!(
                f,
                "item {item_id}: fixed format declares {declared_bytes} bytes but fields sum to {field_bits} bits"
            ),
            SchemaError::VariablePartWidthMismatch { item_id, part_index, declared_bytes, field_bits } => write!(
                f,
                "item {item_id}: variable part {part_index} declares {declared_bytes} bytes but fields plus the FX bit need {field_bits} bits"
            ),
            SchemaError::RepetitiveElementEmpty { item_id } => write!(f, "item {item_id}: repetitive element has no fields"),
            SchemaError::CompoundEmpty { item_id } => write!(f, "item {item_id}: compound item has no sub-items"),
            SchemaError::EmptyUap { category, edition } => write!(f, "category {category} edition {edition}: UAP has no slots"),
            SchemaError::InvalidCodec { item_id, field, message } => write!(f, "item {item_id} field {field}: {message}"),
            SchemaError::ZeroWidthField { item_id, field } => write!(f, "item {item_id} field {field}: zero-width field"),
        }
    }
}

impl std::error::Error for SchemaError {}
