/// How to pick an edition when the caller does not pin one explicitly
/// (spec §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditionPolicy {
    /// Use the registry's lexicographically greatest edition tag.
    Latest,
    /// Require an exact tag match; unmatched categories are reported as
    /// [`asterix_core::error::ErrorKind::UnsupportedEdition`].
    Exact,
}

/// What happens when a UAP slot names an item the registry's selected
/// edition doesn't carry, or an FRN the UAP doesn't declare at all.
///
/// Either way there is no `ItemDef` to consult for the slot's wire length,
/// so the record cannot safely resume decoding past it — both variants end
/// the record there. The only difference is what the caller is left with
/// for the items already decoded earlier in the same record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnUnknownItem {
    /// Record an [`asterix_core::error::ErrorKind::UnknownItem`] and end
    /// the record, keeping every item already decoded earlier in it.
    ReportAndContinue,
    /// Record the error and discard every item already decoded in this
    /// record too, since the unknown slot makes the whole record suspect.
    Fail,
}

/// What happens to bytes left over after a record's FSPEC-declared items
/// are all decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnTrailingBytes {
    /// Record an [`asterix_core::error::ErrorKind::TrailingBytes`] but
    /// keep the record's already-decoded items.
    Report,
    /// Silently discard the remainder.
    Ignore,
}

/// Decode-time limits and policy choices (spec §6). Always constructed
/// explicitly by the caller — never read from a file or environment
/// variable, so a decode run's behavior is fully determined by its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodePolicy {
    pub edition_policy: EditionPolicy,
    pub on_unknown_item: OnUnknownItem,
    pub on_trailing_bytes: OnTrailingBytes,
    /// Hard cap on FSPEC length in bytes; exceeding it is always
    /// unrecoverable for the record (spec §6).
    pub max_fspec_bytes: usize,
    /// Hard cap on FX-chained parts for a single `Variable` item.
    pub max_variable_parts: usize,
    /// Hard cap on `Compound` nesting depth.
    pub max_compound_depth: u32,
    /// Stop decoding further items in a record once this many errors have
    /// been recorded against it (0 means unlimited).
    pub max_errors_per_record: usize,
}

impl Default for DecodePolicy {
    fn default() -> Self {
        DecodePolicy {
            edition_policy: EditionPolicy::Latest,
            on_unknown_item: OnUnknownItem::ReportAndContinue,
            on_trailing_bytes: OnTrailingBytes::Report,
            max_fspec_bytes: 8,
            max_variable_parts: 16,
            max_compound_depth: 4,
            max_errors_per_record: 0,
        }
    }
}
