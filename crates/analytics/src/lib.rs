//! # Meridian Analytics
//!
//! The computational core of the pipeline: daily aggregation of the trade
//! log, the date-keyed inner join against the sentiment index, the Pearson
//! correlation matrix, per-classification summary statistics, and the derived
//! headline insights.
//!
//! ## Architectural Principles
//!
//! - **Pure logic crate.** No I/O, no knowledge of file formats; it consumes
//!   and produces `core-types` records and its own result structs.
//! - **Total functions.** Every entry point is defined for every input,
//!   including the empty ones; degenerate results are represented as `None`
//!   or `NaN`, never as errors.
//! - **Skip-missing semantics.** `Option` fields are excluded from sums,
//!   means, and correlations; an all-missing column stays missing instead of
//!   collapsing to zero.

pub mod aggregate;
pub mod correlation;
pub mod insights;
pub mod merge;
pub mod summary;

// Re-export the key components to create a clean, public-facing API.
pub use aggregate::aggregate_daily;
pub use correlation::{CorrelationMatrix, MetricColumn};
pub use insights::{Insights, derive_insights};
pub use merge::merge_on_date;
pub use summary::{ClassSummary, MeanStd, summarize_by_class};
