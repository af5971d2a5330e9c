//! Configuration system for Causa.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod causa_config;
pub mod logging_config;
pub mod search_config;
pub mod simulation_config;

pub use causa_config::{CausaConfig, ConfigOverrides};
pub use logging_config::LoggingConfig;
pub use search_config::SearchConfig;
pub use simulation_config::SimulationConfig;
