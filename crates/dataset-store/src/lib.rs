//! Dataset Store
//!
//! Accumulates per-segment feature records into a uniform tabular dataset
//! and persists the output table family: consolidated features, summary
//! statistics, segment index, per-condition partitions, rankings and the
//! curated weighted export.

mod assembler;
mod error;
mod record;
mod writer;

pub use assembler::{chunk_samples, segment_id, CHUNK_SIZE, MIN_CHUNK_LEN};
pub use error::DatasetError;
pub use record::{Dataset, SegmentRecord};
pub use writer::DatasetWriter;
