//! Terminal rendering of the analysis results.

use analytics::{ClassSummary, CorrelationMatrix, Insights};
use chrono::NaiveDate;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};
use core_types::{SentimentRecord, TradeRecord};

/// Renders the correlation matrix with three-decimal coefficients, matching
/// the precision of the downstream heatmap. Undefined entries render as "-".
pub fn correlation_table(matrix: &CorrelationMatrix) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut header = vec![Cell::new("")];
    header.extend(matrix.columns().iter().map(|c| Cell::new(c.label())));
    table.set_header(header);

    for (i, column) in matrix.columns().iter().enumerate() {
        let mut row = vec![Cell::new(column.label())];
        for j in 0..matrix.columns().len() {
            let value = matrix.value_at(i, j);
            let text = if value.is_nan() {
                "-".to_string()
            } else {
                format!("{value:.3}")
            };
            row.push(Cell::new(text));
        }
        table.add_row(row);
    }

    table
}

/// Renders the per-classification summary statistics.
pub fn summary_table(summaries: &[ClassSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Classification",
        "Days",
        "Volume mean",
        "Volume std",
        "Trades mean",
        "Trades std",
        "PnL mean",
        "PnL std",
        "Traders mean",
        "Traders std",
        "Value mean",
        "Value min",
        "Value max",
    ]);

    for summary in summaries {
        table.add_row(vec![
            summary.classification.to_string(),
            summary.days.to_string(),
            fmt_opt(summary.total_volume_usd.mean),
            fmt_opt(summary.total_volume_usd.std),
            fmt_opt(summary.trade_count.mean),
            fmt_opt(summary.trade_count.std),
            fmt_opt(summary.total_pnl.mean),
            fmt_opt(summary.total_pnl.std),
            fmt_opt(summary.unique_traders.mean),
            fmt_opt(summary.unique_traders.std),
            format!("{:.2}", summary.value_mean),
            summary.value_min.to_string(),
            summary.value_max.to_string(),
        ]);
    }

    table
}

/// Formats the headline insights as printable lines; empty on degenerate
/// input.
pub fn insight_lines(insights: &Insights) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some((column, r)) = insights.strongest_sentiment_driver {
        lines.push(format!(
            "Strongest correlation with the sentiment index: {} ({r:.3})",
            column.label()
        ));
    }
    if let Some(class) = insights.highest_volume_class {
        lines.push(format!("Highest average trading volume during: {class} periods"));
    }
    if let Some(class) = insights.most_profitable_class {
        lines.push(format!("Most profitable sentiment period: {class} periods"));
    }

    lines
}

/// Record counts, date coverage, and day overlap of the two datasets,
/// reported without running the full pipeline.
#[derive(Debug, Clone)]
pub struct DatasetOverview {
    pub sentiment_records: usize,
    pub sentiment_range: Option<(NaiveDate, NaiveDate)>,
    pub trade_records: usize,
    pub trade_range: Option<(NaiveDate, NaiveDate)>,
    pub overlapping_days: usize,
}

impl DatasetOverview {
    pub fn build(
        sentiment: &[SentimentRecord],
        trades: &[TradeRecord],
        overlapping_days: usize,
    ) -> Self {
        let sentiment_dates = sentiment.iter().map(|r| r.date);
        let trade_dates = trades.iter().filter_map(|t| t.date);

        Self {
            sentiment_records: sentiment.len(),
            sentiment_range: date_range(sentiment_dates),
            trade_records: trades.len(),
            trade_range: date_range(trade_dates),
            overlapping_days,
        }
    }

    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Dataset", "Records", "From", "To"]);
        table.add_row(vec![
            "Sentiment index".to_string(),
            self.sentiment_records.to_string(),
            fmt_range_start(self.sentiment_range),
            fmt_range_end(self.sentiment_range),
        ]);
        table.add_row(vec![
            "Trade log".to_string(),
            self.trade_records.to_string(),
            fmt_range_start(self.trade_range),
            fmt_range_end(self.trade_range),
        ]);
        table
    }
}

fn date_range(dates: impl Iterator<Item = NaiveDate>) -> Option<(NaiveDate, NaiveDate)> {
    dates.fold(None, |range, date| match range {
        None => Some((date, date)),
        Some((min, max)) => Some((min.min(date), max.max(date))),
    })
}

fn fmt_opt(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "-".to_string())
}

fn fmt_range_start(range: Option<(NaiveDate, NaiveDate)>) -> String {
    range
        .map(|(start, _)| start.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn fmt_range_end(range: Option<(NaiveDate, NaiveDate)>) -> String {
    range
        .map(|(_, end)| end.to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::{CorrelationMatrix, derive_insights, summarize_by_class};
    use core_types::{MergedRow, SentimentClass};
    use rust_decimal::Decimal;

    fn merged(day: u32, value: i64, volume: i64) -> MergedRow {
        MergedRow {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            value,
            classification: SentimentClass::Neutral,
            total_volume_usd: Some(Decimal::from(volume)),
            avg_trade_size_usd: None,
            trade_count: 1,
            total_pnl: None,
            avg_pnl: None,
            unique_traders: 1,
            avg_execution_price: None,
        }
    }

    #[test]
    fn correlation_table_has_row_and_column_labels() {
        let rows = vec![merged(1, 10, 100), merged(2, 20, 200), merged(3, 30, 350)];
        let matrix = CorrelationMatrix::compute(&rows);
        let rendered = correlation_table(&matrix).to_string();
        assert!(rendered.contains("Sentiment Value"));
        assert!(rendered.contains("Total Volume USD"));
        assert!(rendered.contains("1.000"));
    }

    #[test]
    fn insight_lines_are_empty_on_degenerate_input() {
        let matrix = CorrelationMatrix::compute(&[]);
        let insights = derive_insights(&matrix, &[]);
        assert!(insight_lines(&insights).is_empty());
    }

    #[test]
    fn summary_table_renders_missing_stats_as_dashes() {
        let rows = vec![merged(1, 10, 100)];
        let summaries = summarize_by_class(&rows);
        let rendered = summary_table(&summaries).to_string();
        assert!(rendered.contains("Neutral"));
        assert!(rendered.contains('-'));
    }

    #[test]
    fn overview_reports_ranges_and_counts() {
        let sentiment = vec![SentimentRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            value: 20,
            classification: SentimentClass::Fear,
        }];
        let overview = DatasetOverview::build(&sentiment, &[], 0);
        assert_eq!(overview.sentiment_records, 1);
        assert_eq!(overview.trade_records, 0);
        assert_eq!(overview.trade_range, None);
        let rendered = overview.table().to_string();
        assert!(rendered.contains("Sentiment index"));
    }
}
