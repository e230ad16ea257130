//! CSV ingest and normalization for the two input datasets.
//!
//! Both loaders follow the same recovery policy: a malformed field is coerced
//! to a missing-value marker (or the row is skipped with a recorded
//! `RowError`), and only a missing file or an unusable header set aborts the
//! run. The loaders never panic on data.

use csv::StringRecord;
use rust_decimal::Decimal;
use std::str::FromStr;

pub mod error;
pub mod sentiment;
pub mod trades;

pub use error::IngestError;
pub use sentiment::load_sentiment;
pub use trades::load_trades;

/// A row-level problem encountered during ingest. The run continues; these
/// are surfaced so the operator can see how much input was discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based data-row number (the header row is not counted).
    pub row: usize,
    pub message: String,
}

/// The outcome of loading one input file: the usable records plus an account
/// of what was read and what was rejected.
#[derive(Debug, Clone)]
pub struct Ingested<T> {
    pub records: Vec<T>,
    pub rows_read: usize,
    pub row_errors: Vec<RowError>,
}

impl<T> Ingested<T> {
    pub fn rows_used(&self) -> usize {
        self.records.len()
    }
}

/// Coerces a raw CSV field to a `Decimal`, returning `None` for empty or
/// non-numeric input.
pub(crate) fn coerce_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed).ok()
}

/// Returns the field at `index`, or an empty string when the row is short.
pub(crate) fn field<'a>(record: &'a StringRecord, index: usize) -> &'a str {
    record.get(index).unwrap_or("")
}

/// Resolves the index of a required header, case-sensitively.
pub(crate) fn required_column(headers: &StringRecord, name: &str) -> Result<usize, IngestError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| IngestError::MissingColumn(name.to_string()))
}
