//! Feature Selection
//!
//! Ranks descriptors by estimated class relevance. The primary ranker is a
//! ReliefF-family nearest-neighbor relevance estimator; a univariate ANOVA
//! F-score takes over when the primary is unavailable or rejects the input.
//! A separate hand-curated weight table drives the weighted export and is
//! never reconciled with the dynamic ranking.

mod anova;
mod curated;
mod error;
mod ranking;
mod relieff;
mod standardize;

pub use anova::anova_f_scores;
pub use curated::CURATED_WEIGHTS;
pub use error::SelectError;
pub use ranking::{rank, top_k, Ranking};
pub use relieff::{relieff_weights, RelieffConfig};
pub use standardize::standardize;

use ndarray::Array2;
use tracing::{debug, warn};

/// Default number of descriptors kept by selection.
pub const DEFAULT_TOP_K: usize = 10;

/// Result of one selection run.
#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    /// All descriptors with their relevance scores, descending
    pub ranking: Ranking,
    /// The selected top descriptors, best first
    pub selected: Vec<String>,
    /// True when the univariate fallback produced the scores
    pub used_fallback: bool,
}

/// Descriptor relevance selector with primary/fallback rankers.
pub struct Selector {
    config: RelieffConfig,
    /// When false the primary ranker is skipped entirely (as when its
    /// dependency is unavailable) and the fallback is used directly.
    primary_enabled: bool,
}

impl Selector {
    /// Create a selector with the default ReliefF configuration.
    pub fn new() -> Self {
        Self::with_config(RelieffConfig::default())
    }

    /// Create a selector with an explicit ReliefF configuration.
    pub fn with_config(config: RelieffConfig) -> Self {
        Self {
            config,
            primary_enabled: true,
        }
    }

    /// Use the univariate fallback unconditionally.
    pub fn fallback_only() -> Self {
        Self {
            config: RelieffConfig::default(),
            primary_enabled: false,
        }
    }

    /// Rank all descriptors and select the top `min(k, total)`.
    ///
    /// The feature matrix is standardized per column before ranking. A
    /// primary-ranker failure (degenerate input) falls back to the ANOVA
    /// F-score with a warning; it is never fatal.
    pub fn select(
        &self,
        names: &[String],
        matrix: &Array2<f64>,
        labels: &[u8],
        k: usize,
    ) -> Result<SelectionOutcome, SelectError> {
        if matrix.nrows() == 0 || matrix.ncols() == 0 {
            return Err(SelectError::EmptyMatrix);
        }
        if matrix.nrows() != labels.len() {
            return Err(SelectError::LabelMismatch {
                rows: matrix.nrows(),
                labels: labels.len(),
            });
        }

        let scaled = standardize(matrix);

        let (scores, used_fallback) = if self.primary_enabled {
            match relieff_weights(&scaled, labels, &self.config) {
                Ok(scores) => (scores, false),
                Err(err) => {
                    warn!(%err, "primary ranker rejected the dataset, using ANOVA F fallback");
                    (anova_f_scores(&scaled, labels)?, true)
                }
            }
        } else {
            debug!("primary ranker disabled, using ANOVA F fallback");
            (anova_f_scores(&scaled, labels)?, true)
        };

        let ranking = rank(names, &scores);
        let selected = top_k(&ranking, k.min(names.len()));
        Ok(SelectionOutcome {
            ranking,
            selected,
            used_fallback,
        })
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}
