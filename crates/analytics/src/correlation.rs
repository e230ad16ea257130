//! Pearson correlation over the numeric columns of the merged dataset.

use core_types::MergedRow;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tracing::debug;

/// The numeric columns of a `MergedRow` that participate in correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MetricColumn {
    SentimentValue,
    TotalVolumeUsd,
    AvgTradeSizeUsd,
    TradeCount,
    TotalPnl,
    AvgPnl,
    UniqueTraders,
    AvgExecutionPrice,
}

impl MetricColumn {
    /// Every candidate column, in the order they appear in the matrix.
    pub const ALL: [MetricColumn; 8] = [
        MetricColumn::SentimentValue,
        MetricColumn::TotalVolumeUsd,
        MetricColumn::AvgTradeSizeUsd,
        MetricColumn::TradeCount,
        MetricColumn::TotalPnl,
        MetricColumn::AvgPnl,
        MetricColumn::UniqueTraders,
        MetricColumn::AvgExecutionPrice,
    ];

    /// Human-readable column label for tables and CSV output.
    pub fn label(&self) -> &'static str {
        match self {
            MetricColumn::SentimentValue => "Sentiment Value",
            MetricColumn::TotalVolumeUsd => "Total Volume USD",
            MetricColumn::AvgTradeSizeUsd => "Avg Trade Size USD",
            MetricColumn::TradeCount => "Trade Count",
            MetricColumn::TotalPnl => "Total PnL",
            MetricColumn::AvgPnl => "Avg PnL",
            MetricColumn::UniqueTraders => "Unique Traders",
            MetricColumn::AvgExecutionPrice => "Avg Execution Price",
        }
    }

    /// Extracts this column from a row, `None` when the value is missing.
    pub fn extract(&self, row: &MergedRow) -> Option<f64> {
        match self {
            MetricColumn::SentimentValue => Some(row.value as f64),
            MetricColumn::TotalVolumeUsd => row.total_volume_usd.and_then(|d| d.to_f64()),
            MetricColumn::AvgTradeSizeUsd => row.avg_trade_size_usd.and_then(|d| d.to_f64()),
            MetricColumn::TradeCount => Some(row.trade_count as f64),
            MetricColumn::TotalPnl => row.total_pnl.and_then(|d| d.to_f64()),
            MetricColumn::AvgPnl => row.avg_pnl.and_then(|d| d.to_f64()),
            MetricColumn::UniqueTraders => Some(row.unique_traders as f64),
            MetricColumn::AvgExecutionPrice => row.avg_execution_price.and_then(|d| d.to_f64()),
        }
    }
}

/// A symmetric Pearson correlation matrix with a unit diagonal.
///
/// Columns that are missing in every merged row are excluded. Off-diagonal
/// entries are `NaN` when a pair has fewer than two complete observations or
/// a degenerate (constant) column.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    columns: Vec<MetricColumn>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Computes the matrix over the merged rows using pairwise-complete
    /// observations: a row contributes to a pair only when both columns are
    /// present in it.
    pub fn compute(rows: &[MergedRow]) -> Self {
        let series: Vec<(MetricColumn, Vec<Option<f64>>)> = MetricColumn::ALL
            .iter()
            .map(|&column| (column, rows.iter().map(|r| column.extract(r)).collect::<Vec<_>>()))
            .filter(|(_, values)| values.iter().any(Option::is_some))
            .collect();

        let n = series.len();
        let mut values = vec![vec![f64::NAN; n]; n];

        for i in 0..n {
            values[i][i] = 1.0;
            for j in (i + 1)..n {
                let r = pearson(&series[i].1, &series[j].1);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        debug!(columns = n, rows = rows.len(), "computed correlation matrix");

        Self {
            columns: series.into_iter().map(|(column, _)| column).collect(),
            values,
        }
    }

    /// The columns that made it into the matrix, in matrix order.
    pub fn columns(&self) -> &[MetricColumn] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The coefficient for a pair of columns; `None` when either column was
    /// excluded from the matrix.
    pub fn get(&self, a: MetricColumn, b: MetricColumn) -> Option<f64> {
        let i = self.columns.iter().position(|&c| c == a)?;
        let j = self.columns.iter().position(|&c| c == b)?;
        Some(self.values[i][j])
    }

    /// Row-major access for rendering.
    pub fn value_at(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

/// Pearson correlation over the pairwise-complete observations of two
/// optional series. `NaN` when fewer than two complete pairs exist or either
/// side has zero variance.
fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }

    cov / (var_x * var_y).sqrt()
}
