//! Loader for the daily fear/greed sentiment index.

use crate::error::IngestError;
use crate::{Ingested, RowError, field, required_column};
use chrono::NaiveDate;
use core_types::{SentimentClass, SentimentRecord};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Date format of the sentiment index CSV.
pub const SENTIMENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Loads the sentiment index from `path`, sorted by ascending date.
///
/// Rows with an unparsable date, an out-of-range or non-integer value, an
/// unknown classification label, or a date already seen are skipped and
/// reported as `RowError`s; the first record for a date wins.
pub fn load_sentiment(path: &Path) -> Result<Ingested<SentimentRecord>, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    let ingested = read_sentiment(file)?;
    info!(
        path = %path.display(),
        rows_read = ingested.rows_read,
        rows_used = ingested.rows_used(),
        "loaded sentiment index"
    );
    if !ingested.row_errors.is_empty() {
        warn!(
            skipped = ingested.row_errors.len(),
            "sentiment rows were rejected during ingest"
        );
    }
    Ok(ingested)
}

/// Reads sentiment records from any CSV source. Split from `load_sentiment`
/// so the parsing policy can be tested without touching the filesystem.
pub fn read_sentiment<R: Read>(reader: R) -> Result<Ingested<SentimentRecord>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let date_idx = required_column(&headers, "date")?;
    let value_idx = required_column(&headers, "value")?;
    let class_idx = required_column(&headers, "classification")?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0;
    let mut seen_dates = HashSet::new();

    for (i, result) in csv_reader.records().enumerate() {
        let row = i + 1;
        rows_read += 1;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                row_errors.push(RowError {
                    row,
                    message: format!("unreadable row: {e}"),
                });
                continue;
            }
        };

        let raw_date = field(&record, date_idx).trim();
        let date = match NaiveDate::parse_from_str(raw_date, SENTIMENT_DATE_FORMAT) {
            Ok(date) => date,
            Err(_) => {
                row_errors.push(RowError {
                    row,
                    message: format!("unparsable date '{raw_date}'"),
                });
                continue;
            }
        };

        let raw_value = field(&record, value_idx).trim();
        let value = match raw_value.parse::<i64>() {
            Ok(v) if (0..=100).contains(&v) => v,
            Ok(v) => {
                row_errors.push(RowError {
                    row,
                    message: format!("value {v} outside [0, 100]"),
                });
                continue;
            }
            Err(_) => {
                row_errors.push(RowError {
                    row,
                    message: format!("non-integer value '{raw_value}'"),
                });
                continue;
            }
        };

        let classification = match field(&record, class_idx).parse::<SentimentClass>() {
            Ok(class) => class,
            Err(e) => {
                row_errors.push(RowError {
                    row,
                    message: e.to_string(),
                });
                continue;
            }
        };

        if !seen_dates.insert(date) {
            row_errors.push(RowError {
                row,
                message: format!("duplicate date {date}"),
            });
            continue;
        }

        records.push(SentimentRecord {
            date,
            value,
            classification,
        });
    }

    records.sort_by_key(|r| r.date);

    Ok(Ingested {
        records,
        rows_read,
        row_errors,
    })
}
