//! Random-graph and simulation configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Noise distributions a config file may name.
pub const KNOWN_NOISE: &[&str] = &["gaussian", "uniform", "exponential", "laplace"];

/// Configuration for random DAGs, linear SEM data and batch trials.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Default: 10.
    pub num_measures: Option<i64>,
    /// Default: 0.
    pub num_latents: Option<i64>,
    /// Default: 2.0.
    pub avg_degree: Option<f64>,
    /// Default: 100.
    pub max_degree: Option<i64>,
    /// Default: 100.
    pub max_indegree: Option<i64>,
    /// Default: 100.
    pub max_outdegree: Option<i64>,
    /// Default: 0.1.
    pub edge_tolerance: Option<f64>,
    /// Default: 1000.
    pub sample_size: Option<i64>,
    /// Default: 0.2.
    pub coef_low: Option<f64>,
    /// Default: 0.7.
    pub coef_high: Option<f64>,
    /// Default: 1.
    pub num_runs: Option<i64>,
    /// Default: 0.
    pub seed: Option<i64>,
    /// Error distribution. Default: `gaussian`.
    pub noise: Option<String>,
}

impl SimulationConfig {
    pub fn effective_edge_tolerance(&self) -> f64 {
        self.edge_tolerance
            .unwrap_or(constants::DEFAULT_EDGE_TOLERANCE)
    }

    pub fn effective_sample_size(&self) -> i64 {
        self.sample_size.unwrap_or(constants::DEFAULT_SAMPLE_SIZE)
    }

    pub fn effective_coef_range(&self) -> (f64, f64) {
        (self.coef_low.unwrap_or(0.2), self.coef_high.unwrap_or(0.7))
    }

    pub fn effective_noise(&self) -> &str {
        self.noise.as_deref().unwrap_or("gaussian")
    }
}
