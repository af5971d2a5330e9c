//! Logging configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `CAUSA_LOG` is unset. Default: `causa=info`.
    pub level: Option<String>,
    /// Include file and line in log lines. Default: false.
    pub with_location: Option<bool>,
}

impl LoggingConfig {
    pub fn effective_level(&self) -> &str {
        self.level.as_deref().unwrap_or("causa=info")
    }
}
