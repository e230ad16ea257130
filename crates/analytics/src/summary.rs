//! Per-classification summary statistics over the merged dataset.

use core_types::{MergedRow, SentimentClass};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::collections::BTreeMap;

/// Mean and sample standard deviation of one metric within a classification
/// group. `mean` is `None` when the metric was missing for the whole group;
/// `std` additionally requires at least two present observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeanStd {
    pub mean: Option<f64>,
    pub std: Option<f64>,
}

impl MeanStd {
    /// Two-pass mean and sample (ddof = 1) standard deviation with
    /// skip-missing semantics.
    fn of(values: impl Iterator<Item = Option<f64>>) -> Self {
        let present: Vec<f64> = values.flatten().collect();
        if present.is_empty() {
            return Self {
                mean: None,
                std: None,
            };
        }

        let n = present.len() as f64;
        let mean = present.iter().sum::<f64>() / n;
        let std = (present.len() >= 2).then(|| {
            let ss = present.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>();
            (ss / (n - 1.0)).sqrt()
        });

        Self {
            mean: Some(mean),
            std,
        }
    }
}

/// Summary statistics for one sentiment classification.
#[derive(Debug, Clone, Serialize)]
pub struct ClassSummary {
    pub classification: SentimentClass,
    /// Number of merged rows (days) in the group.
    pub days: u64,
    pub total_volume_usd: MeanStd,
    pub trade_count: MeanStd,
    pub total_pnl: MeanStd,
    pub unique_traders: MeanStd,
    pub value_mean: f64,
    pub value_min: i64,
    pub value_max: i64,
}

/// Groups merged rows by sentiment classification and summarizes each group.
///
/// Groups are returned in ascending sentiment order (Extreme Fear through
/// Extreme Greed); classifications absent from the merged set produce no row.
pub fn summarize_by_class(rows: &[MergedRow]) -> Vec<ClassSummary> {
    let mut groups: BTreeMap<SentimentClass, Vec<&MergedRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.classification).or_default().push(row);
    }

    groups
        .into_iter()
        .map(|(classification, group)| {
            // Groups are non-empty by construction, so the value stats exist.
            let values: Vec<i64> = group.iter().map(|r| r.value).collect();
            let value_mean = values.iter().sum::<i64>() as f64 / values.len() as f64;

            ClassSummary {
                classification,
                days: group.len() as u64,
                total_volume_usd: MeanStd::of(
                    group
                        .iter()
                        .map(|r| r.total_volume_usd.and_then(|d| d.to_f64())),
                ),
                trade_count: MeanStd::of(group.iter().map(|r| Some(r.trade_count as f64))),
                total_pnl: MeanStd::of(group.iter().map(|r| r.total_pnl.and_then(|d| d.to_f64()))),
                unique_traders: MeanStd::of(group.iter().map(|r| Some(r.unique_traders as f64))),
                value_mean,
                value_min: values.iter().copied().min().unwrap_or_default(),
                value_max: values.iter().copied().max().unwrap_or_default(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn row(day: u32, classification: SentimentClass, value: i64, volume: Option<i64>) -> MergedRow {
        MergedRow {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            value,
            classification,
            total_volume_usd: volume.map(Decimal::from),
            avg_trade_size_usd: None,
            trade_count: 4,
            total_pnl: None,
            avg_pnl: None,
            unique_traders: 2,
            avg_execution_price: None,
        }
    }

    #[test]
    fn groups_in_ascending_sentiment_order() {
        let rows = vec![
            row(1, SentimentClass::Greed, 70, Some(100)),
            row(2, SentimentClass::ExtremeFear, 5, Some(300)),
            row(3, SentimentClass::Greed, 60, Some(200)),
        ];

        let summaries = summarize_by_class(&rows);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].classification, SentimentClass::ExtremeFear);
        assert_eq!(summaries[1].classification, SentimentClass::Greed);
        assert_eq!(summaries[1].days, 2);
    }

    #[test]
    fn computes_mean_std_and_value_range() {
        let rows = vec![
            row(1, SentimentClass::Fear, 20, Some(100)),
            row(2, SentimentClass::Fear, 30, Some(300)),
        ];

        let summary = &summarize_by_class(&rows)[0];
        assert_eq!(summary.total_volume_usd.mean, Some(200.0));
        // Sample std of {100, 300} is sqrt(20000).
        let std = summary.total_volume_usd.std.unwrap();
        assert!((std - 20000f64.sqrt()).abs() < 1e-9);
        assert_eq!(summary.value_mean, 25.0);
        assert_eq!(summary.value_min, 20);
        assert_eq!(summary.value_max, 30);
    }

    #[test]
    fn single_row_group_has_no_std() {
        let rows = vec![row(1, SentimentClass::Neutral, 50, Some(100))];
        let summary = &summarize_by_class(&rows)[0];
        assert_eq!(summary.total_volume_usd.mean, Some(100.0));
        assert_eq!(summary.total_volume_usd.std, None);
        assert_eq!(summary.trade_count.std, None);
    }

    #[test]
    fn all_missing_metric_stays_missing() {
        let rows = vec![
            row(1, SentimentClass::Fear, 20, None),
            row(2, SentimentClass::Fear, 30, None),
        ];
        let summary = &summarize_by_class(&rows)[0];
        assert_eq!(summary.total_volume_usd.mean, None);
        assert_eq!(summary.total_volume_usd.std, None);
        // PnL is absent in the fixture rows as well.
        assert_eq!(summary.total_pnl.mean, None);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(summarize_by_class(&[]).is_empty());
    }
}
