//! Tabular datasets: typed variables, rows of cases, and transforms.

pub mod dataset;
pub mod transform;
pub mod variable;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use dataset::DataSet;
pub use transform::nonparanormal;
pub use variable::{Variable, VariableKind};

/// The kind of data an algorithm accepts or a dataset holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Continuous,
    Discrete,
    Mixed,
}

impl DataType {
    /// Whether an algorithm requiring `self` can run on data of type `actual`.
    /// `Mixed` algorithms accept anything; otherwise the types must match.
    pub fn accepts(self, actual: DataType) -> bool {
        self == DataType::Mixed || self == actual
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Continuous => "continuous",
            Self::Discrete => "discrete",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
