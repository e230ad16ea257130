//! Headline findings derived from the correlation matrix and the
//! per-classification summary.

use crate::correlation::{CorrelationMatrix, MetricColumn};
use crate::summary::ClassSummary;
use core_types::SentimentClass;
use serde::Serialize;

/// The short list of findings printed at the end of a run. Every field is
/// `None` on degenerate input (empty merge, all-NaN correlations).
#[derive(Debug, Clone, Serialize)]
pub struct Insights {
    /// The trading metric with the largest absolute correlation against the
    /// sentiment value, with its coefficient.
    pub strongest_sentiment_driver: Option<(MetricColumn, f64)>,
    /// The classification with the highest mean daily volume.
    pub highest_volume_class: Option<SentimentClass>,
    /// The classification with the highest mean daily total PnL.
    pub most_profitable_class: Option<SentimentClass>,
}

/// Derives the insights from the already-computed analysis artifacts.
pub fn derive_insights(matrix: &CorrelationMatrix, summaries: &[ClassSummary]) -> Insights {
    let strongest_sentiment_driver = matrix
        .columns()
        .iter()
        .filter(|&&column| column != MetricColumn::SentimentValue)
        .filter_map(|&column| {
            let r = matrix.get(MetricColumn::SentimentValue, column)?;
            (!r.is_nan()).then_some((column, r))
        })
        .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()));

    Insights {
        strongest_sentiment_driver,
        highest_volume_class: best_class_by(summaries, |s| s.total_volume_usd.mean),
        most_profitable_class: best_class_by(summaries, |s| s.total_pnl.mean),
    }
}

/// The classification whose group maximizes the given metric mean, ignoring
/// groups where the metric is missing.
fn best_class_by<F>(summaries: &[ClassSummary], metric: F) -> Option<SentimentClass>
where
    F: Fn(&ClassSummary) -> Option<f64>,
{
    summaries
        .iter()
        .filter_map(|s| metric(s).map(|m| (s.classification, m)))
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(classification, _)| classification)
}
