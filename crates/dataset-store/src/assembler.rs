//! Segment Chunking

/// Sources longer than this are split into contiguous chunks of this size.
pub const CHUNK_SIZE: usize = 1000;

/// Chunks shorter than this are dropped.
pub const MIN_CHUNK_LEN: usize = 10;

/// Split a sample sequence for assembly. Sequences up to [`CHUNK_SIZE`]
/// pass through whole; longer ones are cut into contiguous [`CHUNK_SIZE`]
/// chunks, dropping a trailing remainder shorter than [`MIN_CHUNK_LEN`].
pub fn chunk_samples(samples: &[f64]) -> Vec<&[f64]> {
    if samples.len() <= CHUNK_SIZE {
        return vec![samples];
    }
    samples
        .chunks(CHUNK_SIZE)
        .filter(|chunk| chunk.len() >= MIN_CHUNK_LEN)
        .collect()
}

/// Identifier for the i-th chunk of a source (1-based).
pub fn segment_id(stem: &str, index: usize) -> String {
    format!("{stem}_segment_{}", index + 1)
}
