//! Univariate ANOVA F-Scores
//!
//! Fallback relevance ranking: a one-way analysis-of-variance F statistic
//! per descriptor against the binary label. Zero-denominator cases (single
//! class, constant within-class values) score 0 instead of failing.

use crate::error::SelectError;
use ndarray::Array2;

/// Compute one F-score per descriptor column.
pub fn anova_f_scores(matrix: &Array2<f64>, labels: &[u8]) -> Result<Vec<f64>, SelectError> {
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

    let groups: Vec<Vec<usize>> = [0u8, 1u8]
        .iter()
        .map(|&class| {
            (0..rows)
                .filter(|&i| labels[i] == class)
                .collect::<Vec<_>>()
        })
        .filter(|members| !members.is_empty())
        .collect();

    let n_groups = groups.len();

    let scores = (0..cols)
        .map(|feature| {
            if n_groups < 2 || rows <= n_groups {
                return 0.0;
            }
            let column = matrix.column(feature);
            let grand_mean = column.iter().sum::<f64>() / rows as f64;

            let mut between = 0.0;
            let mut within = 0.0;
            for members in &groups {
                let group_mean =
                    members.iter().map(|&i| column[i]).sum::<f64>() / members.len() as f64;
                between += members.len() as f64 * (group_mean - grand_mean).powi(2);
                within += members
                    .iter()
                    .map(|&i| (column[i] - group_mean).powi(2))
                    .sum::<f64>();
            }

            let ms_between = between / (n_groups - 1) as f64;
            let ms_within = within / (rows - n_groups) as f64;
            if ms_within == 0.0 {
                0.0
            } else {
                ms_between / ms_within
            }
        })
        .collect();

    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn matrix_from_rows(rows: Vec<Vec<f64>>) -> Array2<f64> {
        let n = rows.len();
        let d = rows[0].len();
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        Array2::from_shape_vec((n, d), flat).unwrap()
    }

    #[test]
    fn test_separated_means_score_higher() {
        let rows = vec![
            vec![1.0, 5.0],
            vec![1.1, 5.2],
            vec![0.9, 4.8],
            vec![9.0, 5.1],
            vec![9.1, 4.9],
            vec![8.9, 5.0],
        ];
        let scores =
            anova_f_scores(&matrix_from_rows(rows), &[0, 0, 0, 1, 1, 1]).unwrap();
        assert!(scores[0] > scores[1]);
        assert!(scores[0] > 100.0);
    }

    #[test]
    fn test_single_class_scores_zero() {
        let rows = vec![vec![1.0], vec![2.0], vec![3.0]];
        let scores = anova_f_scores(&matrix_from_rows(rows), &[0, 0, 0]).unwrap();
        assert_eq!(scores, vec![0.0]);
    }

    #[test]
    fn test_zero_within_variance_is_guarded() {
        let rows = vec![vec![1.0], vec![1.0], vec![2.0], vec![2.0]];
        let scores = anova_f_scores(&matrix_from_rows(rows), &[0, 0, 1, 1]).unwrap();
        assert_eq!(scores, vec![0.0]);
    }
}
