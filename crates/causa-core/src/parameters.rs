//! Named, typed parameter values shared by every algorithm.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::ConfigError;

pub const ALPHA: &str = "alpha";
pub const DEPTH: &str = "depth";
pub const NUM_MEASURES: &str = "numMeasures";
pub const NUM_LATENTS: &str = "numLatents";
pub const AVG_DEGREE: &str = "avgDegree";
pub const MAX_DEGREE: &str = "maxDegree";
pub const MAX_INDEGREE: &str = "maxIndegree";
pub const MAX_OUTDEGREE: &str = "maxOutdegree";
pub const EDGE_TOLERANCE: &str = "edgeTolerance";
pub const SAMPLE_SIZE: &str = "sampleSize";
pub const COEF_LOW: &str = "coefLow";
pub const COEF_HIGH: &str = "coefHigh";
pub const NUM_RUNS: &str = "numRuns";
pub const SEED: &str = "seed";
pub const ORIENTATION_EPSILON: &str = "orientationEpsilon";
pub const TARGET_NAME: &str = "targetName";
pub const REGRESSOR_NAMES: &str = "regressorNames";

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    StrList(Vec<String>),
}

impl ParamValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::StrList(_) => "string list",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
            Self::StrList(v) => f.write_str(&v.join(",")),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(v: Vec<String>) -> Self {
        Self::StrList(v)
    }
}

/// One row of the documented defaults table.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDescription {
    pub key: &'static str,
    pub description: &'static str,
    pub default: Option<ParamValue>,
}

/// Every documented parameter with its default.
pub fn documented() -> Vec<ParamDescription> {
    use ParamValue::{Float, Int};
    let row = |key, description, default| ParamDescription {
        key,
        description,
        default,
    };
    vec![
        row(ALPHA, "Significance level of independence tests", Some(Float(constants::DEFAULT_ALPHA))),
        row(DEPTH, "Maximum conditioning-set size, -1 for unbounded", Some(Int(constants::UNBOUNDED_DEPTH))),
        row(NUM_MEASURES, "Number of measured variables", Some(Int(10))),
        row(NUM_LATENTS, "Number of latent variables", Some(Int(0))),
        row(AVG_DEGREE, "Average degree of the random graph", Some(Float(2.0))),
        row(MAX_DEGREE, "Maximum degree of any node", Some(Int(constants::DEFAULT_MAX_DEGREE))),
        row(MAX_INDEGREE, "Maximum in-degree of any node", Some(Int(constants::DEFAULT_MAX_DEGREE))),
        row(MAX_OUTDEGREE, "Maximum out-degree of any node", Some(Int(constants::DEFAULT_MAX_DEGREE))),
        row(EDGE_TOLERANCE, "Fraction of requested edges a random graph may miss", Some(Float(constants::DEFAULT_EDGE_TOLERANCE))),
        row(SAMPLE_SIZE, "Rows per simulated dataset", Some(Int(constants::DEFAULT_SAMPLE_SIZE))),
        row(COEF_LOW, "Low end of linear coefficient magnitudes", Some(Float(0.2))),
        row(COEF_HIGH, "High end of linear coefficient magnitudes", Some(Float(0.7))),
        row(NUM_RUNS, "Number of independent trials", Some(Int(1))),
        row(SEED, "Base random seed", Some(Int(0))),
        row(ORIENTATION_EPSILON, "Scores at or below this magnitude leave an edge undirected", Some(Float(0.0))),
        row(TARGET_NAME, "Response variable for regression", None),
        row(REGRESSOR_NAMES, "Regressor variables for regression", None),
    ]
}

/// Look up the documentation row for `key`.
pub fn describe(key: &str) -> Option<ParamDescription> {
    documented().into_iter().find(|d| d.key == key)
}

/// String-keyed parameter map. Read-only during a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters {
    values: BTreeMap<String, ParamValue>,
}

impl Parameters {
    /// No values at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every documented parameter that has a default.
    pub fn with_defaults() -> Self {
        let mut params = Self::new();
        for d in documented() {
            if let Some(default) = d.default {
                params.values.insert(d.key.to_string(), default);
            }
        }
        params
    }

    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) -> &mut Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.values.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Overlay `other`'s values onto `self`.
    pub fn extend(&mut self, other: &Parameters) {
        for (k, v) in &other.values {
            self.values.insert(k.clone(), v.clone());
        }
    }

    /// Fails on the first key in `keys` that has no value.
    pub fn ensure_present<S: AsRef<str>>(&self, keys: &[S]) -> Result<(), ConfigError> {
        match keys.iter().find(|k| !self.contains(k.as_ref())) {
            Some(missing) => Err(ConfigError::MissingParameter {
                name: missing.as_ref().to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        match self.require(key)? {
            ParamValue::Bool(v) => Ok(*v),
            other => Err(type_error(key, "bool", other)),
        }
    }

    pub fn get_int(&self, key: &str) -> Result<i64, ConfigError> {
        match self.require(key)? {
            ParamValue::Int(v) => Ok(*v),
            other => Err(type_error(key, "integer", other)),
        }
    }

    /// Integers widen to floats.
    pub fn get_float(&self, key: &str) -> Result<f64, ConfigError> {
        match self.require(key)? {
            ParamValue::Float(v) => Ok(*v),
            ParamValue::Int(v) => Ok(*v as f64),
            other => Err(type_error(key, "float", other)),
        }
    }

    pub fn get_str(&self, key: &str) -> Result<&str, ConfigError> {
        match self.require(key)? {
            ParamValue::Str(v) => Ok(v.as_str()),
            other => Err(type_error(key, "string", other)),
        }
    }

    /// A single string reads as a one-element list.
    pub fn get_str_list(&self, key: &str) -> Result<Vec<String>, ConfigError> {
        match self.require(key)? {
            ParamValue::StrList(v) => Ok(v.clone()),
            ParamValue::Str(v) => Ok(vec![v.clone()]),
            other => Err(type_error(key, "string list", other)),
        }
    }

    /// A non-negative integer as `usize`.
    pub fn get_usize(&self, key: &str) -> Result<usize, ConfigError> {
        let v = self.get_int(key)?;
        usize::try_from(v).map_err(|_| ConfigError::ValidationFailed {
            field: key.to_string(),
            message: format!("must be non-negative, got {v}"),
        })
    }

    /// A non-negative integer as `u64`, e.g. a seed.
    pub fn get_u64(&self, key: &str) -> Result<u64, ConfigError> {
        let v = self.get_int(key)?;
        u64::try_from(v).map_err(|_| ConfigError::ValidationFailed {
            field: key.to_string(),
            message: format!("must be non-negative, got {v}"),
        })
    }

    fn require(&self, key: &str) -> Result<&ParamValue, ConfigError> {
        self.get(key).ok_or_else(|| ConfigError::MissingParameter {
            name: key.to_string(),
        })
    }
}

fn type_error(key: &str, expected: &'static str, found: &ParamValue) -> ConfigError {
    ConfigError::ParameterType {
        name: key.to_string(),
        expected,
        found: found.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_table() {
        let p = Parameters::with_defaults();
        assert_eq!(p.get_float(ALPHA).unwrap(), 0.01);
        assert_eq!(p.get_int(DEPTH).unwrap(), -1);
        assert_eq!(p.get_int(MAX_INDEGREE).unwrap(), 100);
        assert_eq!(p.get_float(EDGE_TOLERANCE).unwrap(), 0.1);
        assert!(!p.contains(TARGET_NAME));
    }

    #[test]
    fn test_empty_has_nothing() {
        let p = Parameters::new();
        assert_eq!(
            p.get_float(ALPHA).unwrap_err(),
            ConfigError::MissingParameter {
                name: "alpha".into()
            }
        );
    }

    #[test]
    fn test_type_mismatch() {
        let mut p = Parameters::new();
        p.set(DEPTH, "deep");
        assert_eq!(
            p.get_int(DEPTH).unwrap_err(),
            ConfigError::ParameterType {
                name: "depth".into(),
                expected: "integer",
                found: "string"
            }
        );
    }

    #[test]
    fn test_int_widens_to_float() {
        let mut p = Parameters::new();
        p.set(AVG_DEGREE, 4i64);
        assert_eq!(p.get_float(AVG_DEGREE).unwrap(), 4.0);
    }

    #[test]
    fn test_ensure_present_names_first_missing() {
        let mut p = Parameters::new();
        p.set(ALPHA, 0.05);
        let err = p.ensure_present(&[ALPHA, DEPTH, SEED]).unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter { name: "depth".into() });
    }

    #[test]
    fn test_negative_usize_rejected() {
        let mut p = Parameters::new();
        p.set(NUM_RUNS, -2i64);
        assert!(matches!(
            p.get_usize(NUM_RUNS),
            Err(ConfigError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn test_json_shape() {
        let mut p = Parameters::new();
        p.set(ALPHA, 0.05).set(DEPTH, 2i64).set(REGRESSOR_NAMES, vec!["X1".to_string()]);
        let json = serde_json::to_string(&p).unwrap();
        let back: Parameters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
