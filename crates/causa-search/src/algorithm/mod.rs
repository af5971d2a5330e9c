//! Uniform `search(data, parameters) -> graph` interface.
//!
//! Optional capabilities (background knowledge, an initial-graph source) are
//! separate traits, discovered through the `as_*_mut` accessors rather than
//! by downcasting.

pub mod fas;
pub mod pairwise;
pub mod registry;

use causa_core::data::{DataSet, DataType};
use causa_core::errors::{ConfigError, SearchResult};
use causa_core::graph::Graph;
use causa_core::knowledge::Knowledge;
use causa_core::parameters::Parameters;
use tracing::info_span;

pub use fas::FasAlgorithm;
pub use pairwise::PairwiseOrientation;
pub use registry::{AlgorithmMetadata, AlgorithmRegistry, AlgorithmType, OracleType, TestMetadata};

pub trait Algorithm: Send + Sync {
    /// Run the search. Callers normally go through [`execute`], which checks
    /// data type and parameters first.
    fn search(&self, data: &DataSet, params: &Parameters) -> SearchResult<Graph>;

    /// The graph an estimate should be scored against, given the true graph.
    fn comparison_graph(&self, true_graph: &Graph) -> SearchResult<Graph>;

    fn description(&self) -> String;

    fn data_type(&self) -> DataType;

    /// Every parameter `search` reads.
    fn parameters(&self) -> Vec<&'static str>;

    fn as_has_knowledge_mut(&mut self) -> Option<&mut dyn HasKnowledge> {
        None
    }

    fn as_takes_initial_graph_mut(&mut self) -> Option<&mut dyn TakesInitialGraph> {
        None
    }
}

pub trait HasKnowledge {
    fn knowledge(&self) -> &Knowledge;

    fn set_knowledge(&mut self, knowledge: Knowledge);
}

pub trait TakesInitialGraph {
    fn set_initial_graph(&mut self, algorithm: Box<dyn Algorithm>);

    fn initial_graph(&self) -> Option<&dyn Algorithm>;
}

/// Check compatibility, then search.
///
/// Fails with `IncompatibleDataType` when the algorithm cannot run on the
/// dataset's type, and `MissingParameter` for the first declared parameter
/// absent from `params`.
pub fn execute(algorithm: &dyn Algorithm, data: &DataSet, params: &Parameters) -> SearchResult<Graph> {
    let required = algorithm.data_type();
    let actual = data.data_type();
    if !required.accepts(actual) {
        return Err(ConfigError::IncompatibleDataType {
            algorithm: algorithm.description(),
            required: required.to_string(),
            actual: actual.to_string(),
        }
        .into());
    }
    params.ensure_present(&algorithm.parameters())?;

    let _span = info_span!("search", algorithm = %algorithm.description(), dataset = data.name()).entered();
    algorithm.search(data, params)
}
