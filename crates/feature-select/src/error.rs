//! Selection Error Types

use thiserror::Error;

/// Errors during relevance ranking.
#[derive(Debug, Error)]
pub enum SelectError {
    /// Only one class is present; nearest-neighbor relevance needs both
    #[error("dataset contains a single class")]
    SingleClass,

    /// No rows or no columns to rank
    #[error("feature matrix is empty")]
    EmptyMatrix,

    /// Label vector does not match the matrix
    #[error("matrix has {rows} rows but {labels} labels")]
    LabelMismatch { rows: usize, labels: usize },
}
