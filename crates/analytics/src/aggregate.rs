//! Groups the trade log by calendar date into `DailyAggregate` rows.

use chrono::NaiveDate;
use core_types::{DailyAggregate, TradeRecord};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Monetary aggregates are reported to cents.
const MONEY_DP: u32 = 2;

/// A sum over an optional column with skip-missing semantics.
///
/// Missing values contribute to neither the sum nor the mean denominator; a
/// column that was missing for the whole group yields `None` rather than zero.
#[derive(Debug, Default, Clone, Copy)]
struct ColumnSum {
    sum: Decimal,
    present: u64,
}

impl ColumnSum {
    fn add(&mut self, value: Option<Decimal>) {
        if let Some(v) = value {
            self.sum += v;
            self.present += 1;
        }
    }

    fn total(&self) -> Option<Decimal> {
        (self.present > 0).then(|| self.sum.round_dp(MONEY_DP))
    }

    fn mean(&self) -> Option<Decimal> {
        (self.present > 0).then(|| (self.sum / Decimal::from(self.present)).round_dp(MONEY_DP))
    }
}

#[derive(Debug, Default)]
struct DayAccumulator {
    size_usd: ColumnSum,
    closed_pnl: ColumnSum,
    execution_price: ColumnSum,
    trade_count: u64,
    accounts: HashSet<String>,
}

impl DayAccumulator {
    fn add(&mut self, trade: &TradeRecord) {
        // Every record for the date counts, whatever the state of its fields.
        self.trade_count += 1;
        self.size_usd.add(trade.size_usd);
        self.closed_pnl.add(trade.closed_pnl);
        self.execution_price.add(trade.execution_price);
        self.accounts.insert(trade.account.clone());
    }

    fn finish(self, date: NaiveDate) -> DailyAggregate {
        DailyAggregate {
            date,
            total_volume_usd: self.size_usd.total(),
            avg_trade_size_usd: self.size_usd.mean(),
            trade_count: self.trade_count,
            total_pnl: self.closed_pnl.total(),
            avg_pnl: self.closed_pnl.mean(),
            unique_traders: self.accounts.len() as u64,
            avg_execution_price: self.execution_price.mean(),
        }
    }
}

/// Groups trades by their derived calendar date and computes the per-date
/// statistics. Trades without a derived date are excluded entirely; the
/// output is ordered by ascending date.
pub fn aggregate_daily(trades: &[TradeRecord]) -> Vec<DailyAggregate> {
    let mut groups: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();

    for trade in trades {
        let Some(date) = trade.date else {
            continue;
        };
        groups.entry(date).or_default().add(trade);
    }

    debug!(days = groups.len(), trades = trades.len(), "aggregated trade log");

    groups
        .into_iter()
        .map(|(date, acc)| acc.finish(date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn trade(date: Option<&str>, account: &str, size_usd: Option<Decimal>) -> TradeRecord {
        let date = date.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap());
        TradeRecord {
            timestamp: date.and_then(|d| d.and_hms_opt(12, 0, 0)),
            date,
            account: account.to_string(),
            execution_price: None,
            size_tokens: None,
            size_usd,
            closed_pnl: None,
            fee: None,
        }
    }

    #[test]
    fn groups_by_date_and_counts_every_record() {
        let trades = vec![
            trade(Some("2024-01-01"), "a", Some(dec!(300))),
            trade(Some("2024-01-01"), "b", Some(dec!(200))),
            trade(Some("2024-01-01"), "a", None),
            trade(Some("2024-01-02"), "c", Some(dec!(50))),
            trade(None, "d", Some(dec!(1000))),
        ];

        let aggregates = aggregate_daily(&trades);
        assert_eq!(aggregates.len(), 2);

        let first = &aggregates[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        // The missing-size trade still counts, but not in volume or the mean.
        assert_eq!(first.trade_count, 3);
        assert_eq!(first.total_volume_usd, Some(dec!(500.00)));
        assert_eq!(first.avg_trade_size_usd, Some(dec!(250.00)));
        assert_eq!(first.unique_traders, 2);

        assert_eq!(aggregates[1].trade_count, 1);
    }

    #[test]
    fn all_missing_column_yields_missing_not_zero() {
        let trades = vec![
            trade(Some("2024-01-01"), "a", None),
            trade(Some("2024-01-01"), "b", None),
        ];

        let aggregates = aggregate_daily(&trades);
        assert_eq!(aggregates[0].trade_count, 2);
        assert_eq!(aggregates[0].total_volume_usd, None);
        assert_eq!(aggregates[0].avg_trade_size_usd, None);
        assert_eq!(aggregates[0].total_pnl, None);
    }

    #[test]
    fn means_round_to_cents() {
        let trades = vec![
            trade(Some("2024-01-01"), "a", Some(dec!(10))),
            trade(Some("2024-01-01"), "b", Some(dec!(10))),
            trade(Some("2024-01-01"), "c", Some(dec!(11))),
        ];

        let aggregates = aggregate_daily(&trades);
        assert_eq!(aggregates[0].avg_trade_size_usd, Some(dec!(10.33)));
    }

    #[test]
    fn empty_input_produces_no_groups() {
        assert!(aggregate_daily(&[]).is_empty());
    }
}
