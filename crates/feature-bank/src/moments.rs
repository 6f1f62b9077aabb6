//! Parameterized Moment Families
//!
//! Raw, central, absolute and central-absolute moments over a configurable
//! order range. Orders beyond ~20 are numerically unstable (overflow or
//! collapse to 0 depending on data scale); they are computed uniformly and
//! callers must treat large-order outputs as low-confidence.

use crate::statistics::mean;
use std::ops::RangeInclusive;

/// Raw moment orders E[x^k].
pub const RAW_MOMENT_ORDERS: RangeInclusive<u32> = 1..=4;
/// Central moment orders E[(x-mu)^k].
pub const CENTRAL_MOMENT_ORDERS: RangeInclusive<u32> = 2..=10;
/// Absolute moment orders E[|x|^k].
pub const ABS_MOMENT_ORDERS: RangeInclusive<u32> = 1..=10;
/// Central-absolute moment orders E[|x-mu|^k].
pub const CENTRAL_ABS_MOMENT_ORDERS: RangeInclusive<u32> = 1..=100;

/// E[x^k]
pub fn raw_moment(values: &[f64], order: u32) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| v.powi(order as i32)).sum::<f64>() / values.len() as f64
}

/// E[(x - mu)^k]
pub fn central_moment(values: &[f64], order: u32) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(order as i32)).sum::<f64>() / values.len() as f64
}

/// E[|x|^k]
pub fn abs_moment(values: &[f64], order: u32) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| v.abs().powi(order as i32)).sum::<f64>() / values.len() as f64
}

/// E[|x - mu|^k]
pub fn central_abs_moment(values: &[f64], order: u32) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values
        .iter()
        .map(|v| (v - m).abs().powi(order as i32))
        .sum::<f64>()
        / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_raw_moment_is_mean() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        assert!((raw_moment(&values, 1) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_second_central_moment_is_population_variance() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((central_moment(&values, 2) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_odd_central_moment_of_symmetric_data_is_zero() {
        let values = vec![-2.0, -1.0, 0.0, 1.0, 2.0];
        assert!(central_moment(&values, 3).abs() < 1e-12);
        assert!(central_moment(&values, 5).abs() < 1e-12);
    }

    #[test]
    fn test_abs_moment_ignores_sign() {
        let values = vec![-3.0, 3.0];
        assert!((abs_moment(&values, 1) - 3.0).abs() < 1e-12);
        assert!((abs_moment(&values, 3) - 27.0).abs() < 1e-12);
    }

    #[test]
    fn test_central_abs_moment_even_order_matches_central() {
        let values = vec![0.5, 1.5, 2.5, 4.5];
        assert!((central_abs_moment(&values, 2) - central_moment(&values, 2)).abs() < 1e-12);
    }

    #[test]
    fn test_high_order_moment_is_finite_for_unit_scale() {
        let values = vec![0.1, -0.2, 0.3, -0.1, 0.2];
        assert!(central_abs_moment(&values, 100).is_finite());
    }
}
