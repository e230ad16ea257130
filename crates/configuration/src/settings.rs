use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the analysis run.
///
/// Every field has a default matching the conventional repository layout, so
/// the pipeline runs without a `config.toml` and command-line overrides stay
/// optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub inputs: Inputs,
    #[serde(default)]
    pub outputs: Outputs,
}

/// Locations of the two input datasets.
#[derive(Debug, Clone, Deserialize)]
pub struct Inputs {
    /// The daily fear/greed sentiment index CSV.
    #[serde(default = "default_sentiment_csv")]
    pub sentiment_csv: PathBuf,
    /// The per-execution trade log CSV.
    #[serde(default = "default_trades_csv")]
    pub trades_csv: PathBuf,
}

/// Where the run writes its flat-file results.
#[derive(Debug, Clone, Deserialize)]
pub struct Outputs {
    /// Created on demand if it does not exist.
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
}

impl Default for Inputs {
    fn default() -> Self {
        Self {
            sentiment_csv: default_sentiment_csv(),
            trades_csv: default_trades_csv(),
        }
    }
}

impl Default for Outputs {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

fn default_sentiment_csv() -> PathBuf {
    PathBuf::from("csv_files/fear_greed_index.csv")
}

fn default_trades_csv() -> PathBuf {
    PathBuf::from("csv_files/historical_data.csv")
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("outputs")
}
