//! Dataset Error Types

use thiserror::Error;

/// Errors during dataset assembly and persistence.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A record's feature count does not match the dataset columns
    #[error("record has {actual} features, dataset has {expected} columns")]
    ColumnMismatch { expected: usize, actual: usize },

    /// A requested descriptor column does not exist
    #[error("unknown descriptor column: {0}")]
    UnknownColumn(String),

    /// Filesystem failure while writing output
    #[error("output write failed: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failure
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),
}
