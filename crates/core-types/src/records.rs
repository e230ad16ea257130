use crate::enums::SentimentClass;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One day of the market-sentiment index.
///
/// Invariants (enforced at ingest): `value` lies in `[0, 100]` and dates are
/// unique across the loaded set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub date: NaiveDate,
    pub value: i64,
    pub classification: SentimentClass,
}

/// A single execution from the trade log.
///
/// Numeric fields use `Option<Decimal>` as the missing-value marker: malformed
/// or empty input coerces to `None` at ingest and is skipped by aggregation
/// rather than treated as zero. `date` is the calendar date of `timestamp`;
/// when the timestamp itself failed to parse both are `None` and the record is
/// excluded from date-keyed aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub timestamp: Option<NaiveDateTime>,
    pub date: Option<NaiveDate>,
    pub account: String,
    pub execution_price: Option<Decimal>,
    pub size_tokens: Option<Decimal>,
    pub size_usd: Option<Decimal>,
    pub closed_pnl: Option<Decimal>,
    pub fee: Option<Decimal>,
}

/// Per-date statistics derived from the trade log.
///
/// `trade_count` counts every record for the date regardless of field
/// validity; the `Option` aggregates are `None` when the underlying column was
/// missing for every trade that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub total_volume_usd: Option<Decimal>,
    pub avg_trade_size_usd: Option<Decimal>,
    pub trade_count: u64,
    pub total_pnl: Option<Decimal>,
    pub avg_pnl: Option<Decimal>,
    pub unique_traders: u64,
    pub avg_execution_price: Option<Decimal>,
}

/// The inner join of a `SentimentRecord` and a `DailyAggregate` on date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRow {
    pub date: NaiveDate,
    pub value: i64,
    pub classification: SentimentClass,
    pub total_volume_usd: Option<Decimal>,
    pub avg_trade_size_usd: Option<Decimal>,
    pub trade_count: u64,
    pub total_pnl: Option<Decimal>,
    pub avg_pnl: Option<Decimal>,
    pub unique_traders: u64,
    pub avg_execution_price: Option<Decimal>,
}

impl MergedRow {
    /// Combines the two sides of the join for a single date.
    pub fn from_parts(sentiment: &SentimentRecord, aggregate: &DailyAggregate) -> Self {
        Self {
            date: sentiment.date,
            value: sentiment.value,
            classification: sentiment.classification,
            total_volume_usd: aggregate.total_volume_usd,
            avg_trade_size_usd: aggregate.avg_trade_size_usd,
            trade_count: aggregate.trade_count,
            total_pnl: aggregate.total_pnl,
            avg_pnl: aggregate.avg_pnl,
            unique_traders: aggregate.unique_traders,
            avg_execution_price: aggregate.avg_execution_price,
        }
    }
}
