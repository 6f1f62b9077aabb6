//! Transform-Domain Descriptors

use crate::statistics::{mean, percentile_sorted, ratio_or_zero, std_dev};
use rustfft::{num_complex::Complex, FftPlanner};

/// Descriptors computed on the magnitude of the full discrete Fourier
/// transform of a segment. Bin indices, not physical frequencies, weight
/// the centroid and bandwidth: the inputs carry no sample-rate metadata.
#[derive(Debug, Clone, Default)]
pub struct SpectralDescriptors {
    /// Mean magnitude
    pub mean: f64,
    /// Peak magnitude
    pub max: f64,
    /// Magnitude standard deviation
    pub std: f64,
    /// Total energy (sum of squared magnitudes)
    pub energy: f64,
    /// Magnitude-weighted mean bin index
    pub centroid: f64,
    /// Magnitude-weighted standard deviation of bin index around the centroid
    pub bandwidth: f64,
    /// 85th percentile of the cumulative magnitude curve
    pub rolloff: f64,
    /// Sum of absolute consecutive magnitude differences
    pub flux: f64,
    /// Mean magnitude of each contiguous spectrum quarter
    pub bands: [f64; 4],
}

/// FFT analyzer for spectral descriptors.
pub struct SpectrumAnalyzer {
    /// FFT planner, reused across segments
    planner: FftPlanner<f64>,
}

impl SpectrumAnalyzer {
    /// Create a new spectrum analyzer.
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    /// Magnitude of the full-length DFT (all n bins).
    pub fn magnitudes(&mut self, signal: &[f64]) -> Vec<f64> {
        if signal.is_empty() {
            return Vec::new();
        }
        let mut buffer: Vec<Complex<f64>> =
            signal.iter().map(|&v| Complex::new(v, 0.0)).collect();
        let fft = self.planner.plan_fft_forward(signal.len());
        fft.process(&mut buffer);
        buffer.iter().map(|c| c.norm()).collect()
    }

    /// Compute all spectral descriptors for a signal.
    pub fn analyze(&mut self, signal: &[f64]) -> SpectralDescriptors {
        let mags = self.magnitudes(signal);
        if mags.is_empty() {
            return SpectralDescriptors::default();
        }

        let total: f64 = mags.iter().sum();
        let weighted: f64 = mags.iter().enumerate().map(|(i, &m)| i as f64 * m).sum();
        let centroid = ratio_or_zero(weighted, total);

        let spread: f64 = mags
            .iter()
            .enumerate()
            .map(|(i, &m)| (i as f64 - centroid).powi(2) * m)
            .sum();
        let bandwidth = ratio_or_zero(spread, total).sqrt();

        // Cumulative magnitude is nondecreasing, so it is already sorted
        // for the percentile computation.
        let mut cumulative = Vec::with_capacity(mags.len());
        let mut acc = 0.0;
        for &m in &mags {
            acc += m;
            cumulative.push(acc);
        }
        let rolloff = percentile_sorted(&cumulative, 85.0);

        let flux: f64 = mags.windows(2).map(|w| (w[1] - w[0]).abs()).sum();

        let n = mags.len();
        let bands = [
            mean(&mags[..n / 4]),
            mean(&mags[n / 4..n / 2]),
            mean(&mags[n / 2..3 * n / 4]),
            mean(&mags[3 * n / 4..]),
        ];

        SpectralDescriptors {
            mean: mean(&mags),
            max: mags.iter().fold(0.0_f64, |a, &m| a.max(m)),
            std: std_dev(&mags),
            energy: mags.iter().map(|m| m * m).sum(),
            centroid,
            bandwidth,
            rolloff,
            flux,
            bands,
        }
    }
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
