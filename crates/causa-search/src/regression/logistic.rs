//! Logistic regression of a binary response by Newton-Raphson (IRLS).

use causa_core::data::DataSet;
use causa_core::errors::{SearchResult, StatisticsError, ValidationError};
use causa_core::parameters::{self, Parameters};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use statrs::function::erf::erfc;
use tracing::debug;

const MAX_ITERATIONS: usize = 100;
const TOLERANCE: f64 = 1e-8;

/// Fitted model. Index 0 of every vector is the intercept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticResult {
    pub target: String,
    /// `"intercept"` followed by the regressor names.
    pub terms: Vec<String>,
    pub coefficients: Vec<f64>,
    pub std_errors: Vec<f64>,
    pub z_scores: Vec<f64>,
    pub p_values: Vec<f64>,
    pub log_likelihood: f64,
    pub iterations: usize,
    pub sample_size: usize,
}

impl LogisticResult {
    pub fn coefficient(&self, term: &str) -> Option<f64> {
        self.terms
            .iter()
            .position(|t| t == term)
            .map(|i| self.coefficients[i])
    }
}

pub struct LogisticRegression<'d> {
    data: &'d DataSet,
}

impl<'d> LogisticRegression<'d> {
    pub fn new(data: &'d DataSet) -> Self {
        Self { data }
    }

    /// Regress using the `targetName` and `regressorNames` parameters.
    pub fn regress_from_parameters(&self, params: &Parameters) -> SearchResult<LogisticResult> {
        let target = params.get_str(parameters::TARGET_NAME)?.to_string();
        let regressors = params.get_str_list(parameters::REGRESSOR_NAMES)?;
        let regressors: Vec<&str> = regressors.iter().map(String::as_str).collect();
        self.regress(&target, &regressors)
    }

    /// Fit `P(target = 1) = sigmoid(b0 + sum bi * xi)`.
    ///
    /// The response is checked to be binary before any fitting happens.
    pub fn regress(&self, target: &str, regressors: &[&str]) -> SearchResult<LogisticResult> {
        self.data.validate_binary_response(target)?;
        let y_col = self.data.column_by_name(target)?;
        let x_cols = regressors
            .iter()
            .map(|r| self.data.column_by_name(r))
            .collect::<Result<Vec<_>, ValidationError>>()?;

        let n = self.data.num_rows();
        let k = regressors.len() + 1;
        let x = DMatrix::from_fn(n, k, |r, c| if c == 0 { 1.0 } else { x_cols[c - 1][r] });
        let y = DVector::from_column_slice(y_col);

        let mut beta = DVector::zeros(k);
        let mut iterations = 0;
        let covariance = loop {
            if iterations == MAX_ITERATIONS {
                return Err(StatisticsError::NotConverged { iterations }.into());
            }
            iterations += 1;

            let p = (&x * &beta).map(sigmoid);
            let w = p.map(|pi| pi * (1.0 - pi));
            let gradient = x.transpose() * (&y - &p);
            let weighted = DMatrix::from_fn(n, k, |r, c| x[(r, c)] * w[r]);
            let information = x.transpose() * weighted;
            let covariance = information
                .try_inverse()
                .ok_or_else(|| StatisticsError::SingularMatrix {
                    context: format!("logistic regression of {target}"),
                })?;

            let step = &covariance * gradient;
            beta += &step;
            if step.amax() < TOLERANCE {
                break covariance;
            }
        };

        let p = (&x * &beta).map(sigmoid);
        let log_likelihood: f64 = y
            .iter()
            .zip(p.iter())
            .map(|(&yi, &pi)| {
                let pi = pi.clamp(f64::MIN_POSITIVE, 1.0 - f64::EPSILON);
                yi * pi.ln() + (1.0 - yi) * (1.0 - pi).ln()
            })
            .sum();

        let coefficients: Vec<f64> = beta.iter().copied().collect();
        let std_errors: Vec<f64> = (0..k).map(|i| covariance[(i, i)].max(0.0).sqrt()).collect();
        let z_scores: Vec<f64> = coefficients
            .iter()
            .zip(&std_errors)
            .map(|(b, se)| b / se)
            .collect();
        let p_values = z_scores
            .iter()
            .map(|z| erfc(z.abs() / std::f64::consts::SQRT_2))
            .collect();

        debug!(response = target, iterations, log_likelihood, "logistic regression converged");

        let mut terms = Vec::with_capacity(k);
        terms.push("intercept".to_string());
        terms.extend(regressors.iter().map(|r| r.to_string()));

        Ok(LogisticResult {
            target: target.to_string(),
            terms,
            coefficients,
            std_errors,
            z_scores,
            p_values,
            log_likelihood,
            iterations,
            sample_size: n,
        })
    }
}

fn sigmoid(t: f64) -> f64 {
    1.0 / (1.0 + (-t).exp())
}
