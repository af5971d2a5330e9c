//! Dataset and knowledge validation errors.

use super::error_code::{self, CausaErrorCode};

/// A dataset (or knowledge) failed a structural precondition.
/// Every variant names the offending variable or value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("response {variable} must be binary: row {row} has value {value}")]
    NonBinaryResponse {
        variable: String,
        row: usize,
        value: f64,
    },

    #[error("variable {variable} is not continuous")]
    NotContinuous { variable: String },

    #[error("variable {variable} is not discrete")]
    NotDiscrete { variable: String },

    #[error("unknown variable: {name}")]
    UnknownVariable { name: String },

    #[error("duplicate variable: {name}")]
    DuplicateVariable { name: String },

    #[error("row {row} has {actual} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("column {variable} has {actual} values, expected {expected}")]
    RaggedColumn {
        variable: String,
        expected: usize,
        actual: usize,
    },

    #[error("variable {variable} at row {row}: value {value} is not a category in 0..{categories}")]
    CategoryOutOfRange {
        variable: String,
        row: usize,
        value: f64,
        categories: u32,
    },

    #[error("variable {variable} at row {row} is not finite")]
    NonFiniteValue { variable: String, row: usize },

    #[error("edge {from} -> {to} is both required and forbidden")]
    ConflictingKnowledge { from: String, to: String },
}

impl CausaErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NonBinaryResponse { .. } => error_code::NON_BINARY_RESPONSE,
            _ => error_code::VALIDATION_ERROR,
        }
    }
}
