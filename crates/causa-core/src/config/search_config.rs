//! Search configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Orientation rules a config file may name.
pub const KNOWN_RULES: &[&str] = &["r4", "skew", "rskew", "tanh"];

/// Configuration for independence testing, FAS and orientation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Significance level. Default: 0.01.
    pub alpha: Option<f64>,
    /// Maximum conditioning-set size, -1 for unbounded. Default: -1.
    pub depth: Option<i64>,
    /// Orientation dead zone. Default: 0.0.
    pub orientation_epsilon: Option<f64>,
    /// Orientation rule id (`r4`, `skew`, `rskew`, `tanh`). Default: `r4`.
    pub rule: Option<String>,
    /// Independence test id. Default: picked from the data type.
    pub test: Option<String>,
}

impl SearchConfig {
    pub fn effective_alpha(&self) -> f64 {
        self.alpha.unwrap_or(constants::DEFAULT_ALPHA)
    }

    pub fn effective_depth(&self) -> i64 {
        self.depth.unwrap_or(constants::UNBOUNDED_DEPTH)
    }

    pub fn effective_orientation_epsilon(&self) -> f64 {
        self.orientation_epsilon.unwrap_or(0.0)
    }

    pub fn effective_rule(&self) -> &str {
        self.rule.as_deref().unwrap_or("r4")
    }
}
