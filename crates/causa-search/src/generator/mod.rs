//! Random DAG generators.

pub mod erdos_renyi;

use causa_core::errors::GeneratorError;
use causa_core::graph::Graph;
use rand::RngCore;

pub use erdos_renyi::ErdosRenyiGibson;

pub trait RandomGraph {
    fn generate(&self, rng: &mut dyn RngCore) -> Result<Graph, GeneratorError>;

    fn description(&self) -> String;

    /// Parameters read by `from_parameters`-style constructors.
    fn parameters(&self) -> Vec<&'static str>;
}
