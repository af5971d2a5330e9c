//! Pearson chi-square test of conditional independence for discrete data.

use causa_core::data::{DataSet, DataType};
use causa_core::errors::{SearchResult, StatisticsError, ValidationError};
use causa_core::parameters::{self, Parameters};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use statrs::distribution::{ChiSquared, ContinuousCDF};

use super::{IndependenceTest, IndependenceWrapper, TestResult};

type Stratum = SmallVec<[u32; 4]>;

/// Stratified chi-square test over integer-coded columns.
#[derive(Debug, Clone)]
pub struct ChiSquare {
    variables: Vec<String>,
    columns: Vec<Vec<u32>>,
    categories: Vec<u32>,
    alpha: f64,
}

impl ChiSquare {
    /// Rejects datasets with a continuous column.
    pub fn new(data: &DataSet, alpha: f64) -> Result<Self, ValidationError> {
        let mut columns = Vec::with_capacity(data.num_columns());
        let mut categories = Vec::with_capacity(data.num_columns());
        for (c, variable) in data.variables().iter().enumerate() {
            let Some(k) = variable.num_categories() else {
                return Err(ValidationError::NotDiscrete {
                    variable: variable.name.clone(),
                });
            };
            categories.push(k);
            columns.push(
                (0..data.num_rows())
                    .map(|r| data.get_int(r, c).unwrap_or(0))
                    .collect(),
            );
        }
        Ok(Self {
            variables: data.variable_names(),
            columns,
            categories,
            alpha,
        })
    }

    /// Summed statistic and degrees of freedom over the strata of `z`.
    pub fn statistic(&self, x: usize, y: usize, z: &[usize]) -> (f64, usize) {
        let (kx, ky) = (self.categories[x] as usize, self.categories[y] as usize);
        let mut tables: FxHashMap<Stratum, Vec<u64>> = FxHashMap::default();
        for row in 0..self.columns[x].len() {
            let key: Stratum = z.iter().map(|&c| self.columns[c][row]).collect();
            let table = tables.entry(key).or_insert_with(|| vec![0; kx * ky]);
            let (a, b) = (self.columns[x][row] as usize, self.columns[y][row] as usize);
            table[a * ky + b] += 1;
        }

        let mut stat = 0.0;
        let mut dof = 0;
        for table in tables.values() {
            let row_sums: Vec<u64> = (0..kx).map(|a| (0..ky).map(|b| table[a * ky + b]).sum()).collect();
            let col_sums: Vec<u64> = (0..ky).map(|b| (0..kx).map(|a| table[a * ky + b]).sum()).collect();
            let total: u64 = row_sums.iter().sum();
            let rows = row_sums.iter().filter(|&&s| s > 0).count();
            let cols = col_sums.iter().filter(|&&s| s > 0).count();
            if rows < 2 || cols < 2 {
                continue;
            }
            dof += (rows - 1) * (cols - 1);
            for a in 0..kx {
                for b in 0..ky {
                    let expected = row_sums[a] as f64 * col_sums[b] as f64 / total as f64;
                    if expected > 0.0 {
                        let observed = table[a * ky + b] as f64;
                        stat += (observed - expected).powi(2) / expected;
                    }
                }
            }
        }
        (stat, dof)
    }
}

impl IndependenceTest for ChiSquare {
    fn variables(&self) -> &[String] {
        &self.variables
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }

    fn check(&self, x: usize, y: usize, z: &[usize]) -> Result<TestResult, StatisticsError> {
        let (stat, dof) = self.statistic(x, y, z);
        if dof == 0 {
            return Err(StatisticsError::NoDegreesOfFreedom {
                context: format!(
                    "{} and {} given {} variables",
                    self.variables[x],
                    self.variables[y],
                    z.len()
                ),
            });
        }
        let dist = ChiSquared::new(dof as f64).map_err(|e| StatisticsError::InvalidDistribution {
            reason: e.to_string(),
        })?;
        Ok(TestResult::from_p_value(dist.sf(stat), self.alpha))
    }

    fn description(&self) -> String {
        format!("Chi-square test, alpha = {}", self.alpha)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChiSquareWrapper;

impl IndependenceWrapper for ChiSquareWrapper {
    fn id(&self) -> &'static str {
        "chi-square"
    }

    fn description(&self) -> String {
        "Chi-square test".to_string()
    }

    fn data_type(&self) -> DataType {
        DataType::Discrete
    }

    fn parameters(&self) -> Vec<&'static str> {
        vec![parameters::ALPHA]
    }

    fn build(&self, data: &DataSet, params: &Parameters) -> SearchResult<Box<dyn IndependenceTest>> {
        let alpha = params.get_float(parameters::ALPHA)?;
        Ok(Box::new(ChiSquare::new(data, alpha)?))
    }
}
