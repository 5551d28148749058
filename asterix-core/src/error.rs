use std::fmt;

/// Failure raised by [`crate::cursor::BitCursor`] itself.
///
/// This is the narrow error surface of the one component allowed to touch
/// the input buffer directly (spec §4.1). Higher layers enrich a
/// `CursorError` into a full [`ErrorKind`]/[`DecodeError`] with item and
/// record context before it reaches a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    /// The requested `[byte_offset, byte_offset + byte_length)` slice does
    /// not fit inside the underlying buffer.
    OutOfBounds,
    /// Fewer bits remained than were requested.
    Truncated { need_bits: u32, have_bits: u32 },
    /// A whole-byte read was attempted while the cursor sits mid-byte.
    Misaligned,
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorError::OutOfBounds => write!(f, "requested slice does not fit in buffer"),
            CursorError::Truncated { need_bits, have_bits } => {
                write!(f, "need {need_bits} bits but only {have_bits} remain")
            }
            CursorError::Misaligned => write!(f, "byte read attempted at a non-aligned bit position"),
        }
    }
}

impl std::error::Error for CursorError {}

/// The exhaustive classification of decode failures (spec §7).
///
/// `SchemaError` is deliberately not a member of this enum: it belongs to a
/// different lifecycle phase (process startup, via `asterix-schema`) and
/// carries XML-source context rather than a byte/bit offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedCategory { category: u8 },
    UnsupportedEdition { category: u8, edition: String },
    ShortDatablock { have: usize },
    LengthMismatch { declared: u16, remaining: usize },
    Truncated { need_bits: u32, have_bits: u32 },
    Misaligned,
    FspecOverflow { max_bytes: usize },
    UnknownItem { slot: u32 },
    ExtensionOverflow { max_parts: usize },
    RepetitiveOverflow { rep: u32, needed_bytes: usize, remaining_bytes: usize },
    ExplicitLenInvalid { len: u8 },
    CompoundDepthExceeded { max_depth: u32 },
    TrailingBytes { count: usize },
    /// A failure that leaves the item's true wire length unknowable — a
    /// corrupt FX chain or a corrupt secondary FSPEC (spec §4.3's ordering
    /// rule). Always terminates the enclosing record.
    Unrecoverable { reason: &'static str },
}

impl From<CursorError> for ErrorKind {
    fn from(e: CursorError) -> Self {
        match e {
            CursorError::OutOfBounds => ErrorKind::Unrecoverable { reason: "cursor out of bounds" },
            CursorError::Truncated { need_bits, have_bits } => ErrorKind::Truncated { need_bits, have_bits },
            CursorError::Misaligned => ErrorKind::Misaligned,
        }
    }
}

impl ErrorKind {
    /// Whether this kind always terminates the *enclosing record* rather
    /// than being attached to a single item (spec §7's "Unrecoverable"
    /// policy row).
    pub fn is_unrecoverable(&self) -> bool {
        matches!(
            self,
            ErrorKind::FspecOverflow { .. }
                | ErrorKind::ExtensionOverflow { .. }
                | ErrorKind::RepetitiveOverflow { .. }
                | ErrorKind::Unrecoverable { .. }
        )
    }

    /// A stable, variant-identifying label for tallying and log filtering —
    /// independent of the human-readable `Display` text.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::UnsupportedCategory { .. } => "unsupported_category",
            ErrorKind::UnsupportedEdition { .. } => "unsupported_edition",
            ErrorKind::ShortDatablock { .. } => "short_datablock",
            ErrorKind::LengthMismatch { .. } => "length_mismatch",
            ErrorKind::Truncated { .. } => "truncated",
            ErrorKind::Misaligned => "misaligned",
            ErrorKind::FspecOverflow { .. } => "fspec_overflow",
            ErrorKind::UnknownItem { .. } => "unknown_item",
            ErrorKind::ExtensionOverflow { .. } => "extension_overflow",
            ErrorKind::RepetitiveOverflow { .. } => "repetitive_overflow",
            ErrorKind::ExplicitLenInvalid { .. } => "explicit_len_invalid",
            ErrorKind::CompoundDepthExceeded { .. } => "compound_depth_exceeded",
            ErrorKind::TrailingBytes { .. } => "trailing_bytes",
            ErrorKind::Unrecoverable { .. } => "unrecoverable",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnsupportedCategory { category } => write!(f, "unsupported category {category}"),
            ErrorKind::UnsupportedEdition { category, edition } => {
                write!(f, "category {category} has no edition {edition}")
            }
            ErrorKind::ShortDatablock { have } => write!(f, "datablock header truncated ({have} bytes available)"),
            ErrorKind::LengthMismatch { declared, remaining } => {
                write!(f, "declared length {declared} inconsistent with {remaining} remaining bytes")
            }
            ErrorKind::Truncated { need_bits, have_bits } => {
                write!(f, "need {need_bits} bits but only {have_bits} remain")
            }
            ErrorKind::Misaligned => write!(f, "byte read at non-aligned bit position"),
            ErrorKind::FspecOverflow { max_bytes } => write!(f, "FSPEC exceeded {max_bytes} bytes"),
            ErrorKind::UnknownItem { slot } => write!(f, "FSPEC bit set for unknown UAP slot {slot}"),
            ErrorKind::ExtensionOverflow { max_parts } => write!(f, "variable item exceeded {max_parts} parts"),
            ErrorKind::RepetitiveOverflow { rep, needed_bytes, remaining_bytes } => write!(
                f,
                "repetitive item needs {needed_bytes} bytes for REP={rep} but only {remaining_bytes} remain"
            ),
            ErrorKind::ExplicitLenInvalid { len } => write!(f, "explicit item LEN={len} is invalid"),
            ErrorKind::CompoundDepthExceeded { max_depth } => {
                write!(f, "compound nesting exceeded depth {max_depth}")
            }
            ErrorKind::TrailingBytes { count } => write!(f, "{count} trailing bytes after last FSPEC item"),
            ErrorKind::Unrecoverable { reason } => write!(f, "unrecoverable: {reason}"),
        }
    }
}

/// A classified, located decode failure (spec §4.8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    pub kind: ErrorKind,
    pub category: Option<u8>,
    pub item_id: Option<String>,
    pub byte_offset: usize,
    pub bit_offset: Option<u32>,
    pub message: Option<String>,
}

impl DecodeError {
    pub fn new(kind: ErrorKind, byte_offset: usize) -> Self {
        DecodeError { kind, category: None, item_id: None, byte_offset, bit_offset: None, message: None }
    }

    pub fn with_category(mut self, category: u8) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_item(mut self, item_id: impl Into<String>) -> Self {
        self.item_id = Some(item_id.into());
        self
    }

    pub fn with_bit_offset(mut self, bit_offset: u32) -> Self {
        self.bit_offset = Some(bit_offset);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_unrecoverable(&self) -> bool {
        self.kind.is_unrecoverable()
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.kind, self.byte_offset)?;
        if let Some(bit) = self.bit_offset {
            write!(f, " bit {bit}")?;
        }
        if let Some(item) = &self.item_id {
            write!(f, " (item {item})")?;
        }
        if let Some(cat) = self.category {
            write!(f, " [CAT{cat:03}]")?;
        }
        if let Some(msg) = &self.message {
            write!(f, ": {msg}")?;
        }
        Ok(())
    }
}

impl std::error::Error for DecodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_error_converts_to_error_kind() {
        let kind: ErrorKind = CursorError::Truncated { need_bits: 12, have_bits: 4 }.into();
        assert_eq!(kind, ErrorKind::Truncated { need_bits: 12, have_bits: 4 });
    }

    #[test]
    fn unrecoverable_kinds_are_flagged() {
        assert!(ErrorKind::FspecOverflow { max_bytes: 8 }.is_unrecoverable());
        assert!(ErrorKind::Unrecoverable { reason: "corrupt FX chain" }.is_unrecoverable());
        assert!(!ErrorKind::Truncated { need_bits: 1, have_bits: 0 }.is_unrecoverable());
        assert!(!ErrorKind::TrailingBytes { count: 2 }.is_unrecoverable());
    }

    #[test]
    fn label_is_stable_across_variant_fields() {
        assert_eq!(ErrorKind::Truncated { need_bits: 1, have_bits: 0 }.label(), "truncated");
        assert_eq!(ErrorKind::Truncated { need_bits: 99, have_bits: 50 }.label(), "truncated");
    }

    #[test]
    fn display_includes_context() {
        let err = DecodeError::new(ErrorKind::Misaligned, 4)
            .with_category(48)
            .with_item("020");
        assert!(format!("{err}").contains("byte 4"));
        assert!(format!("{err}").contains("CAT048"));
    }
}
