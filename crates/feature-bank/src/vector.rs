//! Feature Vector Assembly

use crate::moments::{
    abs_moment, central_abs_moment, central_moment, raw_moment, ABS_MOMENT_ORDERS,
    CENTRAL_ABS_MOMENT_ORDERS, CENTRAL_MOMENT_ORDERS, RAW_MOMENT_ORDERS,
};
use crate::spectral::SpectrumAnalyzer;
use crate::statistics::{
    autocorrelation, histogram_entropy, kurtosis, mean, mean_abs, peak_abs, percentile,
    ratio_or_zero, rms, skewness, std_dev, variance, zero_crossings,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum segment length for descriptor computation. Callers must filter
/// shorter sequences before calling into this crate.
pub const MIN_SAMPLES: usize = 3;

/// Number of descriptors in the selection-oriented battery.
pub const CORE_DIMENSION: usize = 17;

/// Number of descriptors in the full battery.
pub const FULL_DIMENSION: usize = 170;

/// Autocorrelation lags, in output order.
const AUTOCORR_LAGS: [usize; 5] = [1, 2, 3, 5, 10];

/// The selection-oriented descriptor subset. Column-compatible with the
/// leading descriptors of the full battery.
pub const CORE_DESCRIPTORS: [&str; CORE_DIMENSION] = [
    "mean",
    "std_dev",
    "max",
    "min",
    "rms",
    "variance",
    "skewness",
    "kurtosis",
    "peak_to_peak",
    "crest_factor",
    "shape_factor",
    "impulse_factor",
    "margin_factor",
    "energy",
    "zero_crossings",
    "mean_abs",
    "peak_to_rms",
];

/// Descriptors the full battery adds after the core subset, ahead of the
/// generated moment families.
const EXTENDED_DESCRIPTORS: [&str; 30] = [
    "median",
    "amplitude",
    "coeff_variation",
    "range",
    "percentile_25",
    "percentile_75",
    "iqr",
    "entropy",
    "autocorr_lag_1",
    "autocorr_lag_2",
    "autocorr_lag_3",
    "autocorr_lag_5",
    "autocorr_lag_10",
    "fft_mean",
    "fft_max",
    "fft_std",
    "fft_energy",
    "fft_centroid",
    "fft_bandwidth",
    "fft_rolloff",
    "fft_flux",
    "fft_band_1",
    "fft_band_2",
    "fft_band_3",
    "fft_band_4",
    "diff_abs_mean",
    "diff_abs_std",
    "diff_abs_max",
    "diff_abs_min",
    "diff_abs_median",
];

/// Ordered descriptor values for one segment. The column names live in
/// [`FeatureBank::core_names`] / [`FeatureBank::full_names`]; values and
/// names share one fixed order for the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Descriptor values, in battery order
    pub values: Vec<f64>,
}

impl FeatureVector {
    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no descriptors are present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Descriptor computation engine. Owns the FFT planner so transform plans
/// are reused across segments.
pub struct FeatureBank {
    spectrum: SpectrumAnalyzer,
}

impl FeatureBank {
    /// Create a new feature bank.
    pub fn new() -> Self {
        Self {
            spectrum: SpectrumAnalyzer::new(),
        }
    }

    /// Names of the selection-oriented battery, in output order.
    pub fn core_names() -> Vec<String> {
        CORE_DESCRIPTORS.iter().map(|s| s.to_string()).collect()
    }

    /// Names of the full battery, in output order.
    pub fn full_names() -> Vec<String> {
        let mut names: Vec<String> = CORE_DESCRIPTORS
            .iter()
            .chain(EXTENDED_DESCRIPTORS.iter())
            .map(|s| s.to_string())
            .collect();
        names.extend(RAW_MOMENT_ORDERS.map(|k| format!("raw_moment_{k}")));
        names.extend(CENTRAL_MOMENT_ORDERS.map(|k| format!("central_moment_{k}")));
        names.extend(ABS_MOMENT_ORDERS.map(|k| format!("abs_moment_{k}")));
        names.extend(CENTRAL_ABS_MOMENT_ORDERS.map(|k| format!("central_abs_moment_{k}")));
        names
    }

    /// Compute the selection-oriented 17-descriptor battery.
    ///
    /// Precondition: `samples.len() >= MIN_SAMPLES`.
    pub fn compute_core(&self, samples: &[f64]) -> FeatureVector {
        debug_assert!(samples.len() >= MIN_SAMPLES);

        let mut values = Vec::with_capacity(CORE_DIMENSION);
        Self::push_core(&mut values, samples);
        FeatureVector { values }
    }

    /// Compute the full descriptor battery.
    ///
    /// Precondition: `samples.len() >= MIN_SAMPLES`.
    pub fn compute_full(&mut self, samples: &[f64]) -> FeatureVector {
        debug_assert!(samples.len() >= MIN_SAMPLES);
        debug!(n = samples.len(), "computing full descriptor battery");

        let mut values = Vec::with_capacity(FULL_DIMENSION);
        Self::push_core(&mut values, samples);

        let max = samples.iter().fold(f64::MIN, |a, &v| a.max(v));
        let min = samples.iter().fold(f64::MAX, |a, &v| a.min(v));
        let m = mean(samples);
        let p25 = percentile(samples, 25.0);
        let p75 = percentile(samples, 75.0);

        values.push(percentile(samples, 50.0)); // median
        values.push(max - min); // amplitude
        values.push(ratio_or_zero(std_dev(samples), m)); // coeff_variation
        values.push(max - min); // range
        values.push(p25);
        values.push(p75);
        values.push(p75 - p25); // iqr
        values.push(histogram_entropy(samples));
        for lag in AUTOCORR_LAGS {
            values.push(autocorrelation(samples, lag));
        }

        let spectral = self.spectrum.analyze(samples);
        values.push(spectral.mean);
        values.push(spectral.max);
        values.push(spectral.std);
        values.push(spectral.energy);
        values.push(spectral.centroid);
        values.push(spectral.bandwidth);
        values.push(spectral.rolloff);
        values.push(spectral.flux);
        values.extend(spectral.bands);

        let abs_diffs: Vec<f64> = samples.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
        values.push(mean(&abs_diffs));
        values.push(std_dev(&abs_diffs));
        values.push(abs_diffs.iter().fold(f64::MIN, |a, &v| a.max(v)));
        values.push(abs_diffs.iter().fold(f64::MAX, |a, &v| a.min(v)));
        values.push(percentile(&abs_diffs, 50.0));

        for k in RAW_MOMENT_ORDERS {
            values.push(raw_moment(samples, k));
        }
        for k in CENTRAL_MOMENT_ORDERS {
            values.push(central_moment(samples, k));
        }
        for k in ABS_MOMENT_ORDERS {
            values.push(abs_moment(samples, k));
        }
        for k in CENTRAL_ABS_MOMENT_ORDERS {
            values.push(central_abs_moment(samples, k));
        }

        FeatureVector { values }
    }

    /// Shared leading section of both batteries.
    fn push_core(values: &mut Vec<f64>, samples: &[f64]) {
        let max = samples.iter().fold(f64::MIN, |a, &v| a.max(v));
        let min = samples.iter().fold(f64::MAX, |a, &v| a.min(v));
        let root_mean_square = rms(samples);
        let abs_mean = mean_abs(samples);
        let peak = peak_abs(samples);
        let sqrt_abs_mean = mean(&samples.iter().map(|v| v.abs().sqrt()).collect::<Vec<_>>());

        values.push(mean(samples));
        values.push(std_dev(samples));
        values.push(max);
        values.push(min);
        values.push(root_mean_square);
        values.push(variance(samples));
        values.push(skewness(samples));
        values.push(kurtosis(samples));
        values.push(max - min); // peak_to_peak
        values.push(ratio_or_zero(peak, root_mean_square)); // crest_factor
        values.push(ratio_or_zero(root_mean_square, abs_mean)); // shape_factor
        values.push(ratio_or_zero(peak, abs_mean)); // impulse_factor
        values.push(ratio_or_zero(peak, sqrt_abs_mean * sqrt_abs_mean)); // margin_factor
        values.push(samples.iter().map(|v| v * v).sum()); // energy
        values.push(zero_crossings(samples) as f64);
        values.push(abs_mean);
        values.push(ratio_or_zero(peak, root_mean_square)); // peak_to_rms
    }
}

impl Default for FeatureBank {
    fn default() -> Self {
        Self::new()
    }
}
