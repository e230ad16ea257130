//! Flat-file outputs: the merged per-date dataset and the per-classification
//! summary statistics.

use crate::error::ReportError;
use analytics::ClassSummary;
use core_types::MergedRow;
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the merged dataset, as the downstream charting step expects.
pub const MERGED_FILE: &str = "merged_analysis_data.csv";
/// File name of the sentiment summary statistics.
pub const SUMMARY_FILE: &str = "sentiment_statistics.csv";

/// Writes the merged dataset to `<directory>/merged_analysis_data.csv`,
/// creating the directory if needed. Missing values serialize as empty
/// fields.
pub fn write_merged_csv(directory: &Path, rows: &[MergedRow]) -> Result<PathBuf, ReportError> {
    let path = prepared_path(directory, MERGED_FILE)?;
    let mut writer = csv::Writer::from_path(&path).map_err(|source| ReportError::WriteFile {
        path: path.clone(),
        source,
    })?;

    let write = |writer: &mut csv::Writer<fs::File>| -> Result<(), csv::Error> {
        writer.write_record([
            "date",
            "value",
            "classification",
            "Total_Volume_USD",
            "Avg_Trade_Size_USD",
            "Trade_Count",
            "Total_PnL",
            "Avg_PnL",
            "Unique_Traders",
            "Avg_Price",
        ])?;
        for row in rows {
            writer.write_record([
                row.date.to_string(),
                row.value.to_string(),
                row.classification.to_string(),
                decimal_field(row.total_volume_usd),
                decimal_field(row.avg_trade_size_usd),
                row.trade_count.to_string(),
                decimal_field(row.total_pnl),
                decimal_field(row.avg_pnl),
                row.unique_traders.to_string(),
                decimal_field(row.avg_execution_price),
            ])?;
        }
        writer.flush()?;
        Ok(())
    };

    write(&mut writer).map_err(|source| ReportError::WriteFile {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), rows = rows.len(), "wrote merged dataset");
    Ok(path)
}

/// Writes the summary statistics to `<directory>/sentiment_statistics.csv`.
/// Undefined standard deviations serialize as empty fields.
pub fn write_summary_csv(
    directory: &Path,
    summaries: &[ClassSummary],
) -> Result<PathBuf, ReportError> {
    let path = prepared_path(directory, SUMMARY_FILE)?;
    let mut writer = csv::Writer::from_path(&path).map_err(|source| ReportError::WriteFile {
        path: path.clone(),
        source,
    })?;

    let write = |writer: &mut csv::Writer<fs::File>| -> Result<(), csv::Error> {
        writer.write_record([
            "classification",
            "days",
            "volume_mean",
            "volume_std",
            "trade_count_mean",
            "trade_count_std",
            "pnl_mean",
            "pnl_std",
            "traders_mean",
            "traders_std",
            "value_mean",
            "value_min",
            "value_max",
        ])?;
        for summary in summaries {
            let mut record = vec![
                summary.classification.to_string(),
                summary.days.to_string(),
            ];
            for stats in [
                summary.total_volume_usd,
                summary.trade_count,
                summary.total_pnl,
                summary.unique_traders,
            ] {
                record.push(float_field(stats.mean));
                record.push(float_field(stats.std));
            }
            record.push(format!("{:.2}", summary.value_mean));
            record.push(summary.value_min.to_string());
            record.push(summary.value_max.to_string());
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    };

    write(&mut writer).map_err(|source| ReportError::WriteFile {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), groups = summaries.len(), "wrote sentiment summary");
    Ok(path)
}

fn prepared_path(directory: &Path, file: &str) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(directory).map_err(|source| ReportError::CreateDir {
        path: directory.to_path_buf(),
        source,
    })?;
    Ok(directory.join(file))
}

fn decimal_field(value: Option<Decimal>) -> String {
    value.map(|d| d.to_string()).unwrap_or_default()
}

fn float_field(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::summarize_by_class;
    use chrono::NaiveDate;
    use core_types::SentimentClass;
    use rust_decimal_macros::dec;

    fn sample_rows() -> Vec<MergedRow> {
        vec![MergedRow {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            value: 20,
            classification: SentimentClass::Fear,
            total_volume_usd: Some(dec!(500.00)),
            avg_trade_size_usd: Some(dec!(250.00)),
            trade_count: 2,
            total_pnl: None,
            avg_pnl: None,
            unique_traders: 2,
            avg_execution_price: Some(dec!(42.10)),
        }]
    }

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "meridian-report-{tag}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn merged_csv_serializes_missing_values_as_empty() {
        let dir = temp_dir("merged");
        let path = write_merged_csv(&dir, &sample_rows()).unwrap();
        let contents = fs::read_to_string(&path).unwrap();

        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,value,classification,Total_Volume_USD,Avg_Trade_Size_USD,Trade_Count,Total_PnL,Avg_PnL,Unique_Traders,Avg_Price"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2024-01-01,20,Fear,500.00,250.00,2,,,2,42.10"
        );
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn summary_csv_round_trips_group_stats() {
        let dir = temp_dir("summary");
        let summaries = summarize_by_class(&sample_rows());
        let path = write_summary_csv(&dir, &summaries).unwrap();
        let contents = fs::read_to_string(&path).unwrap();

        let data_line = contents.lines().nth(1).unwrap();
        // Single-row group: means present, stds empty, PnL entirely missing.
        assert_eq!(
            data_line,
            "Fear,1,500.00,,2.00,,,,2.00,,20.00,20,20"
        );
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn empty_merge_still_writes_headers() {
        let dir = temp_dir("empty");
        let path = write_merged_csv(&dir, &[]).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        fs::remove_dir_all(&dir).unwrap();
    }
}
