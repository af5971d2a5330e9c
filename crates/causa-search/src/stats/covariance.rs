//! Covariance matrices and partial correlations (nalgebra).

use causa_core::errors::StatisticsError;
use nalgebra::DMatrix;

/// Unbiased sample covariance of the given columns.
pub fn covariance_matrix(columns: &[&[f64]]) -> DMatrix<f64> {
    let p = columns.len();
    let n = columns.first().map_or(0, |c| c.len());
    let means: Vec<f64> = columns.iter().map(|c| super::mean(c)).collect();
    let denom = if n > 1 { (n - 1) as f64 } else { 1.0 };

    let mut cov = DMatrix::zeros(p, p);
    for i in 0..p {
        for j in i..p {
            let s: f64 = columns[i]
                .iter()
                .zip(columns[j])
                .map(|(a, b)| (a - means[i]) * (b - means[j]))
                .sum();
            cov[(i, j)] = s / denom;
            cov[(j, i)] = s / denom;
        }
    }
    cov
}

/// Partial correlation of `x` and `y` given `z`, all indices into `cov`.
///
/// Inverts the `[x, y, z..]` submatrix; the result is `-P01 / sqrt(P00 P11)`
/// of the precision matrix. Fails with `SingularMatrix` when the submatrix
/// cannot be inverted.
pub fn partial_correlation(
    cov: &DMatrix<f64>,
    x: usize,
    y: usize,
    z: &[usize],
) -> Result<f64, StatisticsError> {
    let mut idx = Vec::with_capacity(z.len() + 2);
    idx.push(x);
    idx.push(y);
    idx.extend_from_slice(z);

    let k = idx.len();
    let sub = DMatrix::from_fn(k, k, |i, j| cov[(idx[i], idx[j])]);

    if z.is_empty() {
        let d = sub[(0, 0)] * sub[(1, 1)];
        if d <= 0.0 {
            return Err(singular(x, y, z));
        }
        return Ok(sub[(0, 1)] / d.sqrt());
    }

    let precision = sub.try_inverse().ok_or_else(|| singular(x, y, z))?;
    let d = precision[(0, 0)] * precision[(1, 1)];
    if !(d > 0.0) || !d.is_finite() {
        return Err(singular(x, y, z));
    }
    Ok(-precision[(0, 1)] / d.sqrt())
}

fn singular(x: usize, y: usize, z: &[usize]) -> StatisticsError {
    StatisticsError::SingularMatrix {
        context: format!("partial correlation of {x} and {y} given {z:?}"),
    }
}
