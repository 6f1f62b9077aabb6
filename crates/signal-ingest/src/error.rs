//! Ingestion Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the ingestion internals. The public entry point maps
/// all of them to an empty sample sequence; they exist so the failure
/// reason can be logged.
#[derive(Debug, Error)]
pub enum IngestError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Spreadsheet could not be opened or parsed
    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),

    /// No sheet column contained numeric data
    #[error("no numeric column found")]
    NoNumericColumn,
}
