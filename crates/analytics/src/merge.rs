//! Date-keyed inner join of the sentiment index against the daily aggregates.

use core_types::{DailyAggregate, MergedRow, SentimentRecord};
use std::collections::BTreeMap;
use tracing::debug;

/// Inner-joins sentiment records and daily aggregates on exact date equality.
///
/// Only dates present on both sides survive; sentiment-less trading days and
/// trade-less sentiment days are dropped. Both sides are uniquely keyed by
/// date, so the join is 1:1. The output is ordered by ascending date, and an
/// empty overlap yields an empty vector rather than an error.
pub fn merge_on_date(
    sentiment: &[SentimentRecord],
    aggregates: &[DailyAggregate],
) -> Vec<MergedRow> {
    let by_date: BTreeMap<_, _> = aggregates.iter().map(|a| (a.date, a)).collect();

    let mut rows: Vec<MergedRow> = sentiment
        .iter()
        .filter_map(|s| {
            by_date
                .get(&s.date)
                .map(|aggregate| MergedRow::from_parts(s, aggregate))
        })
        .collect();
    rows.sort_by_key(|r| r.date);

    debug!(
        sentiment_days = sentiment.len(),
        trading_days = aggregates.len(),
        merged_days = rows.len(),
        "merged sentiment index with daily aggregates"
    );

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::SentimentClass;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sentiment(d: &str, value: i64, classification: SentimentClass) -> SentimentRecord {
        SentimentRecord {
            date: date(d),
            value,
            classification,
        }
    }

    fn aggregate(d: &str, trade_count: u64, unique_traders: u64) -> DailyAggregate {
        DailyAggregate {
            date: date(d),
            total_volume_usd: Some(dec!(500)),
            avg_trade_size_usd: Some(dec!(250)),
            trade_count,
            total_pnl: Some(dec!(12.5)),
            avg_pnl: Some(dec!(6.25)),
            unique_traders,
            avg_execution_price: Some(dec!(42)),
        }
    }

    #[test]
    fn keeps_only_dates_present_on_both_sides() {
        let sentiment = vec![
            sentiment("2024-01-01", 20, SentimentClass::Fear),
            sentiment("2024-01-02", 80, SentimentClass::ExtremeGreed),
        ];
        let aggregates = vec![aggregate("2024-01-01", 2, 2)];

        let merged = merge_on_date(&sentiment, &aggregates);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].date, date("2024-01-01"));
        assert_eq!(merged[0].value, 20);
        assert_eq!(merged[0].total_volume_usd, Some(dec!(500)));
        assert_eq!(merged[0].unique_traders, 2);
    }

    #[test]
    fn membership_is_symmetric() {
        let sentiment = vec![
            sentiment("2024-01-01", 20, SentimentClass::Fear),
            sentiment("2024-01-03", 50, SentimentClass::Neutral),
        ];
        let aggregates = vec![aggregate("2024-01-02", 1, 1), aggregate("2024-01-03", 4, 3)];

        let merged = merge_on_date(&sentiment, &aggregates);
        // 01 has no trades, 02 has no sentiment; only 03 survives.
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].date, date("2024-01-03"));
    }

    #[test]
    fn empty_overlap_degrades_to_empty_output() {
        let sentiment = vec![sentiment("2024-01-01", 20, SentimentClass::Fear)];
        let aggregates = vec![aggregate("2024-02-01", 1, 1)];
        assert!(merge_on_date(&sentiment, &aggregates).is_empty());
        assert!(merge_on_date(&[], &[]).is_empty());
    }

    #[test]
    fn output_is_ordered_by_date() {
        let sentiment = vec![
            sentiment("2024-01-03", 50, SentimentClass::Neutral),
            sentiment("2024-01-01", 20, SentimentClass::Fear),
        ];
        let aggregates = vec![aggregate("2024-01-01", 1, 1), aggregate("2024-01-03", 1, 1)];

        let merged = merge_on_date(&sentiment, &aggregates);
        assert_eq!(merged[0].date, date("2024-01-01"));
        assert_eq!(merged[1].date, date("2024-01-03"));
    }
}
