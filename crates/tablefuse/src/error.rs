//! Error types for the tablefuse library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tablefuse operations.
#[derive(Debug, Error)]
pub enum FuseError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// One or both inputs have no usable rows or columns.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// No column correspondence could be found between the two tables.
    #[error("No match: {0}")]
    NoMatch(String),

    /// User-selected columns are not a subset of the valid candidate set.
    /// Pipelines treat this as a no-op rather than a failure.
    #[error("Invalid selection: {requested:?} is not contained in {allowed:?}")]
    InvalidSelection {
        requested: Vec<String>,
        allowed: Vec<String>,
    },

    /// A named column does not exist in the table it was addressed to.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for tablefuse operations.
pub type Result<T> = std::result::Result<T, FuseError>;
