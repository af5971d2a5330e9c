//! Aggregate error returned by every search entry point.

use super::error_code::CausaErrorCode;
use super::{ConfigError, GeneratorError, GraphError, StatisticsError, ValidationError};

/// Errors that can surface from a search, generator or regression call.
/// Aggregates the per-concern errors via `From` conversions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Statistical degeneracy: {0}")]
    Statistics(#[from] StatisticsError),

    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

impl CausaErrorCode for SearchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Validation(e) => e.error_code(),
            Self::Statistics(e) => e.error_code(),
            Self::Generator(e) => e.error_code(),
            Self::Graph(e) => e.error_code(),
        }
    }
}

pub type SearchResult<T> = Result<T, SearchError>;
