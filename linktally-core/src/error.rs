use linktally_scanner::ScanError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a whole run. Per-URL problems never show up here.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Failed to read input file {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create output file {}: {source}", path.display())]
    CreateOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write results: {0}")]
    WriteOutput(#[from] std::io::Error),

    #[error("Failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] ScanError),
}
