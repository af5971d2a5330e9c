//! Stable, machine-readable error codes.
//!
//! Every error enum maps to one of these so callers driving the engine from
//! another process can branch on a code instead of a message.

/// Implemented by every Causa error enum.
pub trait CausaErrorCode {
    /// The stable code for this error.
    fn error_code(&self) -> &'static str;
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const MISSING_PARAMETER: &str = "MISSING_PARAMETER";
pub const INCOMPATIBLE_DATA_TYPE: &str = "INCOMPATIBLE_DATA_TYPE";
pub const MISSING_GRAPH_SOURCE: &str = "MISSING_GRAPH_SOURCE";

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const NON_BINARY_RESPONSE: &str = "NON_BINARY_RESPONSE";

pub const STATISTICAL_DEGENERACY: &str = "STATISTICAL_DEGENERACY";

pub const CAPACITY_EXHAUSTED: &str = "CAPACITY_EXHAUSTED";
pub const GENERATOR_ERROR: &str = "GENERATOR_ERROR";

pub const GRAPH_ERROR: &str = "GRAPH_ERROR";
