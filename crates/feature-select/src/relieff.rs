//! ReliefF Relevance Weighting
//!
//! Supervised nearest-neighbor relevance estimation for a binary label:
//! descriptors that separate a sample from its nearest other-class
//! neighbors (misses) while agreeing with its nearest same-class neighbors
//! (hits) gain weight. Manhattan distance, range-normalized differences,
//! one deterministic pass over every sample.

use crate::error::SelectError;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// ReliefF parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelieffConfig {
    /// Nearest hits/misses considered per sample
    pub n_neighbors: usize,
}

impl Default for RelieffConfig {
    fn default() -> Self {
        Self { n_neighbors: 10 }
    }
}

/// Compute one relevance weight per descriptor column.
///
/// Requires both classes to be present. The neighbor count is clamped per
/// sample to the available hits/misses, so datasets smaller than the
/// configured neighborhood still rank.
pub fn relieff_weights(
    matrix: &Array2<f64>,
    labels: &[u8],
    config: &RelieffConfig,
) -> Result<Vec<f64>, SelectError> {
    let rows = matrix.nrows();
    let cols = matrix.ncols();
    if rows == 0 || cols == 0 {
        return Err(SelectError::EmptyMatrix);
    }
    if rows != labels.len() {
        return Err(SelectError::LabelMismatch {
            rows,
            labels: labels.len(),
        });
    }
    if labels.iter().all(|&l| l == labels[0]) {
        return Err(SelectError::SingleClass);
    }

    // Per-column value ranges for difference normalization
    let ranges: Vec<f64> = (0..cols)
        .map(|c| {
            let column = matrix.column(c);
            let max = column.iter().fold(f64::MIN, |a, &v| a.max(v));
            let min = column.iter().fold(f64::MAX, |a, &v| a.min(v));
            max - min
        })
        .collect();

    let diff = |a: usize, b: usize, feature: usize| -> f64 {
        if ranges[feature] == 0.0 {
            0.0
        } else {
            (matrix[[a, feature]] - matrix[[b, feature]]).abs() / ranges[feature]
        }
    };

    let mut weights = vec![0.0; cols];
    let m = rows as f64;

    for i in 0..rows {
        let mut hits: Vec<(f64, usize)> = Vec::new();
        let mut misses: Vec<(f64, usize)> = Vec::new();
        for j in 0..rows {
            if j == i {
                continue;
            }
            let distance: f64 = (0..cols)
                .map(|f| (matrix[[i, f]] - matrix[[j, f]]).abs())
                .sum();
            if labels[j] == labels[i] {
                hits.push((distance, j));
            } else {
                misses.push((distance, j));
            }
        }

        // Stable neighbor order: distance, then sample index
        let by_distance =
            |a: &(f64, usize), b: &(f64, usize)| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1));
        hits.sort_by(by_distance);
        misses.sort_by(by_distance);

        let k_hits = config.n_neighbors.min(hits.len());
        let k_misses = config.n_neighbors.min(misses.len());

        for feature in 0..cols {
            if k_hits > 0 {
                let hit_diff: f64 = hits[..k_hits]
                    .iter()
                    .map(|&(_, j)| diff(i, j, feature))
                    .sum();
                weights[feature] -= hit_diff / (m * k_hits as f64);
            }
            if k_misses > 0 {
                let miss_diff: f64 = misses[..k_misses]
                    .iter()
                    .map(|&(_, j)| diff(i, j, feature))
                    .sum();
                weights[feature] += miss_diff / (m * k_misses as f64);
            }
        }
    }

    debug!(rows, cols, "relieff weights computed");
    Ok(weights)
}
