use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the network insight crates.
///
/// Only loading and configuration can fail. Every analysis function that runs
/// on an already-loaded table is total and has no error path.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// The input export does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A file exists but could not be opened or read.
    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV body could not be tokenised.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// One or more required columns are absent after header trimming.
    #[error("Missing expected columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A report could not be serialised to JSON.
    #[error("Failed to serialize JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the network insight crates.
pub type Result<T> = std::result::Result<T, NetworkError>;
