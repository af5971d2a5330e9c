//! Nonparanormal (Gaussian copula) transform.
//!
//! Each column is mapped through its Winsorized empirical CDF and the
//! standard normal quantile function, then rescaled to the column's original
//! mean and standard deviation (Liu, Lafferty & Wasserman 2009).

use statrs::function::erf::erfc_inv;

use super::DataSet;
use crate::errors::ValidationError;

/// Transform every column of a continuous dataset to nonparanormal form.
///
/// Rejects datasets with any discrete column. Datasets with fewer than two
/// rows are returned unchanged since the Winsorization bound is undefined.
pub fn nonparanormal(data: &DataSet) -> Result<DataSet, ValidationError> {
    if let Some(v) = data.variables().iter().find(|v| !v.is_continuous()) {
        return Err(ValidationError::NotContinuous {
            variable: v.name.clone(),
        });
    }

    let n = data.num_rows();
    if n < 2 {
        return Ok(data.clone());
    }

    let nf = n as f64;
    let delta = 1.0 / (4.0 * nf.powf(0.25) * (std::f64::consts::PI * nf.ln()).sqrt());

    let columns = (0..data.num_columns())
        .map(|c| {
            let column = data.column(c);
            let mean = column.iter().sum::<f64>() / nf;
            let var = column.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (nf - 1.0);
            let sd = var.sqrt();

            average_ranks(column)
                .into_iter()
                .map(|rank| {
                    let p = (rank / nf).clamp(delta, 1.0 - delta);
                    mean + sd * normal_quantile(p)
                })
                .collect()
        })
        .collect();

    DataSet::from_columns(data.name(), data.variables().to_vec(), columns)
}

/// Standard normal quantile via the inverse complementary error function.
fn normal_quantile(p: f64) -> f64 {
    -std::f64::consts::SQRT_2 * erfc_inv(2.0 * p)
}

/// 1-based ranks, ties receiving the average of the ranks they span.
fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // Positions start..end share ranks start+1..=end.
        let rank = (start + 1 + end) as f64 / 2.0;
        for &i in &order[start..end] {
            ranks[i] = rank;
        }
        start = end;
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Variable;

    #[test]
    fn test_average_ranks_with_ties() {
        let ranks = average_ranks(&[3.0, 1.0, 3.0, 2.0]);
        assert_eq!(ranks, vec![3.5, 1.0, 3.5, 2.0]);
    }

    #[test]
    fn test_normal_quantile_symmetry() {
        assert!(normal_quantile(0.5).abs() < 1e-12);
        assert!((normal_quantile(0.975) - 1.959_964).abs() < 1e-4);
        assert!((normal_quantile(0.025) + normal_quantile(0.975)).abs() < 1e-9);
    }

    #[test]
    fn test_preserves_order_within_column() {
        let values: Vec<f64> = (0..50).map(|i| (i as f64).powi(3)).collect();
        let data =
            DataSet::from_columns("cubes", vec![Variable::continuous("X")], vec![values]).unwrap();
        let out = nonparanormal(&data).unwrap();
        let column = out.column(0);
        assert!(column.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_rejects_discrete_column() {
        let data = DataSet::from_columns(
            "d",
            vec![Variable::discrete("D", 2)],
            vec![vec![0.0, 1.0, 1.0]],
        )
        .unwrap();
        assert_eq!(
            nonparanormal(&data).unwrap_err(),
            ValidationError::NotContinuous {
                variable: "D".into()
            }
        );
    }
}
