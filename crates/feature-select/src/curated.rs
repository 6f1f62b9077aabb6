//! Curated Descriptor Weights
//!
//! A fixed, hand-curated top-10 ranking with importance weights, used for
//! the weighted per-segment export. Independent of whatever the dynamic
//! ranker computes in the same run; the two are intentionally never
//! reconciled.

/// Curated descriptors with importance weights, best first.
pub const CURATED_WEIGHTS: [(&str, f64); 10] = [
    ("min", 1.00),
    ("mean_abs", 0.95),
    ("kurtosis", 0.90),
    ("mean", 0.85),
    ("rms", 0.80),
    ("std_dev", 0.75),
    ("peak_to_peak", 0.70),
    ("skewness", 0.65),
    ("energy", 0.60),
    ("variance", 0.55),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_descend_from_one() {
        assert_eq!(CURATED_WEIGHTS[0].1, 1.00);
        assert_eq!(CURATED_WEIGHTS[9].1, 0.55);
        for pair in CURATED_WEIGHTS.windows(2) {
            assert!(pair[0].1 > pair[1].1);
        }
    }
}
