//! Descriptor Library
//!
//! Pure descriptor computation for vibration segments: time-domain
//! statistics, shape factors, entropy, autocorrelation, spectral
//! descriptors and parameterized moment families.

mod moments;
mod spectral;
mod statistics;
mod vector;

pub use moments::{
    abs_moment, central_abs_moment, central_moment, raw_moment, ABS_MOMENT_ORDERS,
    CENTRAL_ABS_MOMENT_ORDERS, CENTRAL_MOMENT_ORDERS, RAW_MOMENT_ORDERS,
};
pub use spectral::{SpectralDescriptors, SpectrumAnalyzer};
pub use statistics::{
    autocorrelation, histogram_entropy, kurtosis, mean, mean_abs, peak_abs, percentile,
    ratio_or_zero, rms, skewness, std_dev, variance, zero_crossings,
};
pub use vector::{FeatureBank, FeatureVector, CORE_DESCRIPTORS, CORE_DIMENSION, FULL_DIMENSION, MIN_SAMPLES};
