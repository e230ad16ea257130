use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to open input file '{path}': {source}")]
    OpenFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Input is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Failed to read CSV headers: {0}")]
    Csv(#[from] csv::Error),
}
