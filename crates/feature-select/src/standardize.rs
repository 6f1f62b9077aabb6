//! Column Standardization

use ndarray::Array2;

/// Standardize each column to zero mean and unit variance. Zero-variance
/// columns are mean-centered only (scale guard of 1), so constant
/// descriptors standardize to all zeros instead of dividing by zero.
pub fn standardize(matrix: &Array2<f64>) -> Array2<f64> {
    let mut scaled = matrix.clone();
    let n = matrix.nrows();
    if n == 0 {
        return scaled;
    }

    for mut column in scaled.columns_mut() {
        let mean = column.iter().sum::<f64>() / n as f64;
        let variance = column.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n as f64;
        let scale = if variance > 0.0 { variance.sqrt() } else { 1.0 };
        column.mapv_inplace(|v| (v - mean) / scale);
    }
    scaled
}
