//! Configuration errors: fatal to the call that raised them.

use super::error_code::{self, CausaErrorCode};

/// Errors raised while resolving parameters, composing algorithms, or
/// loading configuration files.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required parameter: {name}")]
    MissingParameter { name: String },

    #[error("parameter {name} has type {found}, expected {expected}")]
    ParameterType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("algorithm {algorithm} requires {required} data, got {actual} data")]
    IncompatibleDataType {
        algorithm: String,
        required: String,
        actual: String,
    },

    #[error(
        "{algorithm} needs both data and a graph source as inputs; it orients the edges of the input graph using the data"
    )]
    MissingGraphSource { algorithm: String },

    #[error("algorithm {algorithm} needs an independence test")]
    MissingIndependenceTest { algorithm: String },

    #[error("unknown algorithm: {id}")]
    UnknownAlgorithm { id: String },

    #[error("unknown independence test: {id}")]
    UnknownIndependenceTest { id: String },

    #[error("unknown orientation rule: {name}")]
    UnknownRule { name: String },

    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },
}

impl CausaErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingParameter { .. } => error_code::MISSING_PARAMETER,
            Self::IncompatibleDataType { .. } => error_code::INCOMPATIBLE_DATA_TYPE,
            Self::MissingGraphSource { .. } => error_code::MISSING_GRAPH_SOURCE,
            _ => error_code::CONFIG_ERROR,
        }
    }
}
