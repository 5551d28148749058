//! `ErrorReporter` (spec §4.8, component C8): the single place decode
//! errors are logged and tallied, so every caller sees the same
//! classification regardless of which component raised the error.

use std::collections::HashMap;

use asterix_core::error::DecodeError;

/// Accumulates [`DecodeError`]s across a decode run and emits one `log`
/// record per error — `log::error!` for record-unrecoverable kinds,
/// `log::warn!` otherwise (spec §9: no silent skips).
#[derive(Debug, Default)]
pub struct ErrorReporter {
    counts: HashMap<&'static str, usize>,
    total: usize,
}

impl ErrorReporter {
    pub fn new() -> Self {
        ErrorReporter::default()
    }

    pub fn report(&mut self, error: &DecodeError) {
        if error.is_unrecoverable() {
            log::error!("{error}");
        } else {
            log::warn!("{error}");
        }
        *self.counts.entry(error.kind.label()).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn report_all<'a>(&mut self, errors: impl IntoIterator<Item = &'a DecodeError>) {
        for error in errors {
            self.report(error);
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count_for(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }
}
