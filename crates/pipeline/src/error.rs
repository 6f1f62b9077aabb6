//! Pipeline Error Types

use dataset_store::DatasetError;
use feature_select::SelectError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a pipeline run. Per-file problems are skipped and
/// counted instead of raised; only dataset-level and output-level failures
/// surface here.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input path does not exist
    #[error("input not found: {0}")]
    InputNotFound(PathBuf),

    /// Every discovered file was skipped; the run has nothing to assemble
    #[error("no valid segments found under {0}")]
    NoValidSegments(PathBuf),

    /// Dataset assembly or output write failure
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Selection failure not covered by the fallback
    #[error(transparent)]
    Select(#[from] SelectError),

    /// Configuration file failure
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Splitter called with a zero segment count
    #[error("segment count must be positive")]
    InvalidSegmentCount,

    /// Filesystem failure outside the dataset writer
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
