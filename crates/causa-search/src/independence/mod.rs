//! Conditional independence tests: "is X independent of Y given Z?".
//!
//! Tests answer over variable indices into [`IndependenceTest::variables`].
//! A test that cannot be evaluated returns a `StatisticsError`, never a
//! verdict. Wrappers build a test for a dataset and declare the parameters
//! and data type they need.

pub mod chi_square;
pub mod dsep;
pub mod fisher_z;

use causa_core::data::{DataSet, DataType};
use causa_core::errors::{SearchResult, StatisticsError, ValidationError};
use causa_core::parameters::Parameters;

pub use chi_square::{ChiSquare, ChiSquareWrapper};
pub use dsep::{is_d_separated, DSeparation, DSeparationWrapper};
pub use fisher_z::{FisherZ, FisherZWrapper};

/// Outcome of one test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestResult {
    pub independent: bool,
    pub p_value: f64,
}

impl TestResult {
    /// Independent exactly when `p_value > alpha`.
    pub fn from_p_value(p_value: f64, alpha: f64) -> Self {
        Self {
            independent: p_value > alpha,
            p_value,
        }
    }
}

pub trait IndependenceTest: Send + Sync {
    /// Variables this test ranges over, in index order.
    fn variables(&self) -> &[String];

    fn alpha(&self) -> f64;

    fn check(&self, x: usize, y: usize, z: &[usize]) -> Result<TestResult, StatisticsError>;

    fn description(&self) -> String;

    /// Same as `check`, addressing variables by name.
    fn check_names(&self, x: &str, y: &str, z: &[&str]) -> SearchResult<TestResult> {
        let index = |name: &str| {
            self.variables()
                .iter()
                .position(|v| v == name)
                .ok_or_else(|| ValidationError::UnknownVariable {
                    name: name.to_string(),
                })
        };
        let xi = index(x)?;
        let yi = index(y)?;
        let zi = z.iter().map(|&n| index(n)).collect::<Result<Vec<_>, _>>()?;
        Ok(self.check(xi, yi, &zi)?)
    }
}

/// Builds an independence test for a dataset.
pub trait IndependenceWrapper: Send + Sync {
    /// Registry id, e.g. `fisher-z`.
    fn id(&self) -> &'static str;

    fn description(&self) -> String;

    fn data_type(&self) -> DataType;

    /// Parameters `build` reads.
    fn parameters(&self) -> Vec<&'static str>;

    fn build(&self, data: &DataSet, params: &Parameters) -> SearchResult<Box<dyn IndependenceTest>>;
}
