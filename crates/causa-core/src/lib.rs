//! causa-core: datasets, graphs, knowledge, parameters, errors, config and
//! tracing shared by the Causa search engine.

pub mod config;
pub mod constants;
pub mod data;
pub mod errors;
pub mod graph;
pub mod knowledge;
pub mod parameters;
pub mod tracing_setup;

pub use config::CausaConfig;
pub use data::{DataSet, DataType, Variable, VariableKind};
pub use errors::{
    CausaErrorCode, ConfigError, GeneratorError, GraphError, SearchError, SearchResult,
    StatisticsError, ValidationError,
};
pub use graph::{Edge, EdgeKind, Graph, Node, NodeType};
pub use knowledge::Knowledge;
pub use parameters::{ParamValue, Parameters};
