//! Random graph generator errors.

use super::error_code::{self, CausaErrorCode};

/// The generator could not meet its structural targets.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeneratorError {
    #[error("requested {requested} edges over {nodes} nodes but degree caps allowed only {achieved}")]
    CapacityExhausted {
        requested: usize,
        achieved: usize,
        nodes: usize,
    },

    #[error("invalid generator target: {reason}")]
    InvalidTarget { reason: String },
}

impl CausaErrorCode for GeneratorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CapacityExhausted { .. } => error_code::CAPACITY_EXHAUSTED,
            Self::InvalidTarget { .. } => error_code::GENERATOR_ERROR,
        }
    }
}
