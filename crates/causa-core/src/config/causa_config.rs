//! Top-level Causa configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::search_config::KNOWN_RULES;
use super::simulation_config::KNOWN_NOISE;
use super::{LoggingConfig, SearchConfig, SimulationConfig};
use crate::errors::ConfigError;
use crate::parameters::{self, Parameters};

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Caller overrides (`ConfigOverrides`)
/// 2. Environment variables (`CAUSA_*`)
/// 3. Project config (`causa.toml` in the project root)
/// 4. User config (`~/.causa/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CausaConfig {
    pub search: SearchConfig,
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}

/// Overrides a caller (typically a CLI) applies on top of everything else.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub alpha: Option<f64>,
    pub depth: Option<i64>,
    pub rule: Option<String>,
    pub seed: Option<i64>,
    pub num_runs: Option<i64>,
    pub log_level: Option<String>,
}

impl CausaConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4: user config. Only a parse failure is fatal here.
        if let Some(user_path) = user_config_path() {
            if user_path.exists() {
                match Self::merge_toml_file(&mut config, &user_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(path = %user_path.display(), error = %e, "ignoring user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_path = root.join("causa.toml");
        if project_path.exists() {
            Self::merge_toml_file(&mut config, &project_path)?;
        }

        // Layer 2: environment
        Self::apply_env_overrides(&mut config);

        // Layer 1: caller overrides
        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn validate(config: &CausaConfig) -> Result<(), ConfigError> {
        let s = &config.search;
        if let Some(alpha) = s.alpha {
            if !(alpha > 0.0 && alpha < 1.0) {
                return Err(invalid("search.alpha", "must be strictly between 0.0 and 1.0"));
            }
        }
        if let Some(depth) = s.depth {
            if depth < -1 {
                return Err(invalid("search.depth", "must be -1 (unbounded) or non-negative"));
            }
        }
        if let Some(eps) = s.orientation_epsilon {
            if !(eps >= 0.0) {
                return Err(invalid("search.orientation_epsilon", "must be non-negative"));
            }
        }
        if let Some(rule) = &s.rule {
            if !KNOWN_RULES.contains(&rule.as_str()) {
                return Err(invalid(
                    "search.rule",
                    &format!("unknown rule {rule}, expected one of {}", KNOWN_RULES.join(", ")),
                ));
            }
        }

        let sim = &config.simulation;
        for (field, value) in [
            ("simulation.num_measures", sim.num_measures),
            ("simulation.num_latents", sim.num_latents),
            ("simulation.max_degree", sim.max_degree),
            ("simulation.max_indegree", sim.max_indegree),
            ("simulation.max_outdegree", sim.max_outdegree),
            ("simulation.seed", sim.seed),
        ] {
            if value.is_some_and(|v| v < 0) {
                return Err(invalid(field, "must be non-negative"));
            }
        }
        for (field, value) in [
            ("simulation.sample_size", sim.sample_size),
            ("simulation.num_runs", sim.num_runs),
        ] {
            if value.is_some_and(|v| v <= 0) {
                return Err(invalid(field, "must be greater than 0"));
            }
        }
        if sim.avg_degree.is_some_and(|d| !(d >= 0.0)) {
            return Err(invalid("simulation.avg_degree", "must be non-negative"));
        }
        if let Some(tol) = sim.edge_tolerance {
            if !(0.0..=1.0).contains(&tol) {
                return Err(invalid("simulation.edge_tolerance", "must be between 0.0 and 1.0"));
            }
        }
        let (low, high) = sim.effective_coef_range();
        if !(low >= 0.0 && low <= high) {
            return Err(invalid(
                "simulation.coef_low",
                "must be non-negative and not above simulation.coef_high",
            ));
        }
        if let Some(noise) = &sim.noise {
            if !KNOWN_NOISE.contains(&noise.as_str()) {
                return Err(invalid(
                    "simulation.noise",
                    &format!("unknown noise {noise}, expected one of {}", KNOWN_NOISE.join(", ")),
                ));
            }
        }
        Ok(())
    }

    /// Documented defaults overlaid with every value set in this config.
    pub fn to_parameters(&self) -> Parameters {
        let mut p = Parameters::with_defaults();
        let s = &self.search;
        let sim = &self.simulation;

        let floats = [
            (parameters::ALPHA, s.alpha),
            (parameters::ORIENTATION_EPSILON, s.orientation_epsilon),
            (parameters::AVG_DEGREE, sim.avg_degree),
            (parameters::EDGE_TOLERANCE, sim.edge_tolerance),
            (parameters::COEF_LOW, sim.coef_low),
            (parameters::COEF_HIGH, sim.coef_high),
        ];
        for (key, value) in floats {
            if let Some(v) = value {
                p.set(key, v);
            }
        }

        let ints = [
            (parameters::DEPTH, s.depth),
            (parameters::NUM_MEASURES, sim.num_measures),
            (parameters::NUM_LATENTS, sim.num_latents),
            (parameters::MAX_DEGREE, sim.max_degree),
            (parameters::MAX_INDEGREE, sim.max_indegree),
            (parameters::MAX_OUTDEGREE, sim.max_outdegree),
            (parameters::SAMPLE_SIZE, sim.sample_size),
            (parameters::NUM_RUNS, sim.num_runs),
            (parameters::SEED, sim.seed),
        ];
        for (key, value) in ints {
            if let Some(v) = value {
                p.set(key, v);
            }
        }
        p
    }

    fn merge_toml_file(config: &mut CausaConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let file_config: CausaConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Self::merge(config, &file_config);
        Ok(())
    }

    /// `other` wins wherever it has a value.
    fn merge(base: &mut CausaConfig, other: &CausaConfig) {
        macro_rules! take {
            ($section:ident . $field:ident) => {
                if other.$section.$field.is_some() {
                    base.$section.$field = other.$section.$field.clone();
                }
            };
        }

        take!(search.alpha);
        take!(search.depth);
        take!(search.orientation_epsilon);
        take!(search.rule);
        take!(search.test);

        take!(simulation.num_measures);
        take!(simulation.num_latents);
        take!(simulation.avg_degree);
        take!(simulation.max_degree);
        take!(simulation.max_indegree);
        take!(simulation.max_outdegree);
        take!(simulation.edge_tolerance);
        take!(simulation.sample_size);
        take!(simulation.coef_low);
        take!(simulation.coef_high);
        take!(simulation.num_runs);
        take!(simulation.seed);
        take!(simulation.noise);

        take!(logging.level);
        take!(logging.with_location);
    }

    /// Pattern: `CAUSA_<SECTION>_<FIELD>`. Unparseable values are ignored.
    fn apply_env_overrides(config: &mut CausaConfig) {
        if let Some(v) = env_parse::<f64>("CAUSA_SEARCH_ALPHA") {
            config.search.alpha = Some(v);
        }
        if let Some(v) = env_parse::<i64>("CAUSA_SEARCH_DEPTH") {
            config.search.depth = Some(v);
        }
        if let Ok(v) = std::env::var("CAUSA_SEARCH_RULE") {
            config.search.rule = Some(v);
        }
        if let Ok(v) = std::env::var("CAUSA_SEARCH_TEST") {
            config.search.test = Some(v);
        }
        if let Some(v) = env_parse::<i64>("CAUSA_SIMULATION_SAMPLE_SIZE") {
            config.simulation.sample_size = Some(v);
        }
        if let Some(v) = env_parse::<i64>("CAUSA_SIMULATION_NUM_RUNS") {
            config.simulation.num_runs = Some(v);
        }
        if let Some(v) = env_parse::<i64>("CAUSA_SIMULATION_SEED") {
            config.simulation.seed = Some(v);
        }
        if let Ok(v) = std::env::var("CAUSA_LOGGING_LEVEL") {
            config.logging.level = Some(v);
        }
    }

    fn apply_overrides(config: &mut CausaConfig, o: &ConfigOverrides) {
        if let Some(v) = o.alpha {
            config.search.alpha = Some(v);
        }
        if let Some(v) = o.depth {
            config.search.depth = Some(v);
        }
        if let Some(ref v) = o.rule {
            config.search.rule = Some(v.clone());
        }
        if let Some(v) = o.seed {
            config.simulation.seed = Some(v);
        }
        if let Some(v) = o.num_runs {
            config.simulation.num_runs = Some(v);
        }
        if let Some(ref v) = o.log_level {
            config.logging.level = Some(v.clone());
        }
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// `~/.causa/config.toml`
fn user_config_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".causa").join("config.toml"))
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
