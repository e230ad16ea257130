//! Loader for the per-execution trade log.

use crate::error::IngestError;
use crate::{Ingested, RowError, coerce_decimal, field, required_column};
use chrono::NaiveDateTime;
use core_types::TradeRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Fixed timestamp format of the trade log (`day-month-year hour:minute`).
pub const TRADE_TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Loads the trade log from `path`.
///
/// Trade rows are never dropped for bad field values: numeric columns coerce
/// to missing, and an unparsable timestamp leaves the record without a
/// derived date (excluding it from date-keyed aggregation downstream). Only
/// structurally unreadable rows are skipped.
pub fn load_trades(path: &Path) -> Result<Ingested<TradeRecord>, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    let ingested = read_trades(file)?;
    let undated = ingested
        .records
        .iter()
        .filter(|r| r.date.is_none())
        .count();
    info!(
        path = %path.display(),
        rows_read = ingested.rows_read,
        rows_used = ingested.rows_used(),
        "loaded trade log"
    );
    if undated > 0 {
        warn!(
            undated,
            "trades without a parsable timestamp will be excluded from daily aggregation"
        );
    }
    Ok(ingested)
}

/// Reads trade records from any CSV source.
pub fn read_trades<R: Read>(reader: R) -> Result<Ingested<TradeRecord>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let timestamp_idx = required_column(&headers, "Timestamp IST")?;
    let account_idx = required_column(&headers, "Account")?;
    let price_idx = required_column(&headers, "Execution Price")?;
    let size_tokens_idx = required_column(&headers, "Size Tokens")?;
    let size_usd_idx = required_column(&headers, "Size USD")?;
    let pnl_idx = required_column(&headers, "Closed PnL")?;
    let fee_idx = required_column(&headers, "Fee")?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0;

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

        let raw_timestamp = field(&record, timestamp_idx).trim();
        let timestamp = NaiveDateTime::parse_from_str(raw_timestamp, TRADE_TIMESTAMP_FORMAT).ok();

        records.push(TradeRecord {
            timestamp,
            date: timestamp.map(|ts| ts.date()),
            account: field(&record, account_idx).trim().to_string(),
            execution_price: coerce_decimal(field(&record, price_idx)),
            size_tokens: coerce_decimal(field(&record, size_tokens_idx)),
            size_usd: coerce_decimal(field(&record, size_usd_idx)),
            closed_pnl: coerce_decimal(field(&record, pnl_idx)),
            fee: coerce_decimal(field(&record, fee_idx)),
        });
    }

    Ok(Ingested {
        records,
        rows_read,
        row_errors,
    })
}
