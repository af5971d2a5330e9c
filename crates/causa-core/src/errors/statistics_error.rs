//! Statistical degeneracy: a test or estimator cannot be evaluated.

use super::error_code::{self, CausaErrorCode};

/// Raised instead of a verdict when the statistic is undefined.
/// Never to be read as "independent" or "dependent".
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatisticsError {
    #[error(
        "sample size {sample_size} is too small for a conditioning set of size {conditioning_size}"
    )]
    InsufficientSamples {
        sample_size: usize,
        conditioning_size: usize,
    },

    #[error("singular matrix while testing {context}")]
    SingularMatrix { context: String },

    #[error("no degrees of freedom while testing {context}")]
    NoDegreesOfFreedom { context: String },

    #[error("invalid distribution: {reason}")]
    InvalidDistribution { reason: String },

    #[error("did not converge after {iterations} iterations")]
    NotConverged { iterations: usize },
}

impl CausaErrorCode for StatisticsError {
    fn error_code(&self) -> &'static str {
        error_code::STATISTICAL_DEGENERACY
    }
}
