//! # Meridian Report
//!
//! The presentation layer of the pipeline: CSV writers for the flat-file
//! outputs and `comfy-table` rendering of the correlation matrix, summary
//! statistics, headline insights, and the dataset overview.
//!
//! This crate consumes finished results from `analytics` and never computes
//! anything beyond formatting.

pub mod csv_out;
pub mod error;
pub mod tables;

// Re-export the key components to create a clean, public-facing API.
pub use csv_out::{MERGED_FILE, SUMMARY_FILE, write_merged_csv, write_summary_csv};
pub use error::ReportError;
pub use tables::{DatasetOverview, correlation_table, insight_lines, summary_table};
