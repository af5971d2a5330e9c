//! Fisher Z test of vanishing partial correlation for continuous data.

use causa_core::data::{DataSet, DataType};
use causa_core::errors::{SearchResult, StatisticsError, ValidationError};
use causa_core::parameters::{self, Parameters};
use nalgebra::DMatrix;
use statrs::function::erf::erfc;

use super::{IndependenceTest, IndependenceWrapper, TestResult};
use crate::stats::{covariance_matrix, partial_correlation};

/// Partial-correlation test backed by the sample covariance matrix.
#[derive(Debug, Clone)]
pub struct FisherZ {
    variables: Vec<String>,
    cov: DMatrix<f64>,
    sample_size: usize,
    alpha: f64,
}

impl FisherZ {
    /// Rejects datasets with a discrete column.
    pub fn new(data: &DataSet, alpha: f64) -> Result<Self, ValidationError> {
        if let Some(v) = data.variables().iter().find(|v| !v.is_continuous()) {
            return Err(ValidationError::NotContinuous {
                variable: v.name.clone(),
            });
        }
        let columns: Vec<&[f64]> = (0..data.num_columns()).map(|c| data.column(c)).collect();
        Ok(Self {
            variables: data.variable_names(),
            cov: covariance_matrix(&columns),
            sample_size: data.num_rows(),
            alpha,
        })
    }

    /// The Fisher Z statistic of the partial correlation.
    pub fn statistic(&self, x: usize, y: usize, z: &[usize]) -> Result<f64, StatisticsError> {
        let dof = self.sample_size as f64 - z.len() as f64 - 3.0;
        if dof <= 0.0 {
            return Err(StatisticsError::InsufficientSamples {
                sample_size: self.sample_size,
                conditioning_size: z.len(),
            });
        }
        let r = partial_correlation(&self.cov, x, y, z)?;
        if r.abs() >= 1.0 {
            return Ok(f64::INFINITY);
        }
        Ok(0.5 * dof.sqrt() * ((1.0 + r) / (1.0 - r)).ln())
    }
}

impl IndependenceTest for FisherZ {
    fn variables(&self) -> &[String] {
        &self.variables
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }

    fn check(&self, x: usize, y: usize, z: &[usize]) -> Result<TestResult, StatisticsError> {
        let stat = self.statistic(x, y, z)?;
        let p_value = if stat.is_infinite() {
            0.0
        } else {
            erfc(stat.abs() / std::f64::consts::SQRT_2)
        };
        Ok(TestResult::from_p_value(p_value, self.alpha))
    }

    fn description(&self) -> String {
        format!("Fisher Z test, alpha = {}", self.alpha)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FisherZWrapper;

impl IndependenceWrapper for FisherZWrapper {
    fn id(&self) -> &'static str {
        "fisher-z"
    }

    fn description(&self) -> String {
        "Fisher Z test".to_string()
    }

    fn data_type(&self) -> DataType {
        DataType::Continuous
    }

    fn parameters(&self) -> Vec<&'static str> {
        vec![parameters::ALPHA]
    }

    fn build(&self, data: &DataSet, params: &Parameters) -> SearchResult<Box<dyn IndependenceTest>> {
        let alpha = params.get_float(parameters::ALPHA)?;
        Ok(Box::new(FisherZ::new(data, alpha)?))
    }
}
