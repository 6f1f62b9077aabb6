//! Time-Domain Statistics

/// Arithmetic mean. 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by n).
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Root mean square.
pub fn rms(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    (values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64).sqrt()
}

/// Mean absolute value.
pub fn mean_abs(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| v.abs()).sum::<f64>() / values.len() as f64
}

/// Largest absolute sample.
pub fn peak_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}

/// Ratio with an explicit zero-denominator guard.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// q-th percentile (0..=100) with linear interpolation between ranks.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, q)
}

/// Same as [`percentile`] but assumes the input is already sorted.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return sorted[0];
    }
    let rank = q / 100.0 * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Bias-corrected sample skewness. 0 when the deviation is zero or n < 3.
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return 0.0;
    }
    let m = mean(values);
    let nf = n as f64;
    let m2 = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / nf;
    let m3 = values.iter().map(|v| (v - m).powi(3)).sum::<f64>() / nf;
    if m2 == 0.0 {
        return 0.0;
    }
    let g1 = m3 / m2.powf(1.5);
    g1 * (nf * (nf - 1.0)).sqrt() / (nf - 2.0)
}

/// Bias-corrected sample excess kurtosis. 0 when the deviation is zero
/// or n < 4.
pub fn kurtosis(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 4 {
        return 0.0;
    }
    let m = mean(values);
    let nf = n as f64;
    let m2 = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / nf;
    let m4 = values.iter().map(|v| (v - m).powi(4)).sum::<f64>() / nf;
    if m2 == 0.0 {
        return 0.0;
    }
    let g2 = m4 / (m2 * m2) - 3.0;
    ((nf + 1.0) * g2 + 6.0) * (nf - 1.0) / ((nf - 2.0) * (nf - 3.0))
}

/// Number of sign changes between consecutive samples. Zero is treated
/// as its own sign bucket.
pub fn zero_crossings(values: &[f64]) -> usize {
    values
        .windows(2)
        .filter(|w| sign(w[0]) != sign(w[1]))
        .count()
}

fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Shannon entropy of a normalized histogram with `min(20, n/2)` equal-width
/// bins over [min, max]. A small constant inside the logarithm keeps empty
/// bins defined.
pub fn histogram_entropy(values: &[f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    let bins = (n / 2).min(20).max(1);
    let lo = values.iter().fold(f64::MAX, |a, &v| a.min(v));
    let hi = values.iter().fold(f64::MIN, |a, &v| a.max(v));
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = if width == 0.0 {
            0
        } else {
            (((v - lo) / width) as usize).min(bins - 1)
        };
        counts[idx] += 1;
    }

    -counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / n as f64;
            p * (p + 1e-10).log2()
        })
        .sum::<f64>()
}

/// Pearson autocorrelation at the given lag. 0 when the sequence is too
/// short for the lag or either slice has zero variance.
pub fn autocorrelation(values: &[f64], lag: usize) -> f64 {
    if values.len() <= lag {
        return 0.0;
    }
    let a = &values[..values.len() - lag];
    let b = &values[lag..];
    pearson(a, b)
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let ma = mean(a);
    let mb = mean(b);
    let mut cov = 0.0;
    let mut va = 0.0;
    let mut vb = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        cov += (x - ma) * (y - mb);
        va += (x - ma) * (x - ma);
        vb += (y - mb) * (y - mb);
    }
    cov /= n;
    va /= n;
    vb /= n;
    let denom = (va * vb).sqrt();
    ratio_or_zero(cov, denom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_variance() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((mean(&values) - 3.0).abs() < 1e-12);
        assert!((variance(&values) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_interpolation() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        assert!((percentile(&values, 25.0) - 1.75).abs() < 1e-12);
        assert!((percentile(&values, 50.0) - 2.5).abs() < 1e-12);
        assert!((percentile(&values, 100.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_skewness_symmetric() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert!(skewness(&values).abs() < 1e-12);
    }

    #[test]
    fn test_kurtosis_constant_is_guarded() {
        let values = vec![2.0; 8];
        assert_eq!(kurtosis(&values), 0.0);
        assert_eq!(skewness(&values), 0.0);
    }

    #[test]
    fn test_zero_crossings_counts_zero_bucket() {
        // -1 -> 0 -> 1 is two sign changes
        let values = vec![-1.0, 0.0, 1.0, 1.0, -1.0];
        assert_eq!(zero_crossings(&values), 3);
    }

    #[test]
    fn test_entropy_constant_sequence_near_zero() {
        let values = vec![5.0; 40];
        assert!(histogram_entropy(&values).abs() < 1e-6);
    }

    #[test]
    fn test_entropy_uniform_two_bins() {
        // Two equal-mass clusters in a 2-bin histogram gives 1 bit
        let values = vec![0.0, 0.0, 1.0, 1.0];
        assert!((histogram_entropy(&values) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_autocorrelation_linear_sequence() {
        let values: Vec<f64> = (0..50).map(|i| i as f64).collect();
        assert!((autocorrelation(&values, 1) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_autocorrelation_short_sequence() {
        let values = vec![1.0, 2.0];
        assert_eq!(autocorrelation(&values, 5), 0.0);
    }

    #[test]
    fn test_ratio_guard() {
        assert_eq!(ratio_or_zero(3.0, 0.0), 0.0);
        assert!((ratio_or_zero(3.0, 2.0) - 1.5).abs() < 1e-12);
    }
}
