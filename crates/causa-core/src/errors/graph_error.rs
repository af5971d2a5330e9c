//! Graph structure errors.

use super::error_code::{self, CausaErrorCode};

/// Errors raised by graph mutations and DAG-only operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("unknown node: {name}")]
    UnknownNode { name: String },

    #[error("duplicate node: {name}")]
    DuplicateNode { name: String },

    #[error("self-loop on {name}")]
    SelfLoop { name: String },

    #[error("{node1} and {node2} are already adjacent")]
    DuplicateEdge { node1: String, node2: String },

    #[error("no edge between {node1} and {node2}")]
    MissingEdge { node1: String, node2: String },

    #[error("edge {from} -> {to} would create a cycle")]
    CycleDetected { from: String, to: String },

    #[error("not a DAG: {reason}")]
    NotADag { reason: String },
}

impl CausaErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        error_code::GRAPH_ERROR
    }
}
