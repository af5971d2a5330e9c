//! FAS behind the algorithm facade.

use causa_core::data::{DataSet, DataType};
use causa_core::errors::SearchResult;
use causa_core::graph::{pattern_for_dag, Graph};
use causa_core::knowledge::Knowledge;
use causa_core::parameters::{self, Parameters};

use super::{Algorithm, HasKnowledge};
use crate::fas::Fas;
use crate::independence::IndependenceWrapper;

/// Skeleton search with a pluggable independence test.
pub struct FasAlgorithm {
    test: Box<dyn IndependenceWrapper>,
    knowledge: Knowledge,
}

impl FasAlgorithm {
    pub fn new(test: Box<dyn IndependenceWrapper>) -> Self {
        Self {
            test,
            knowledge: Knowledge::default(),
        }
    }

    pub fn test(&self) -> &dyn IndependenceWrapper {
        self.test.as_ref()
    }
}

impl Algorithm for FasAlgorithm {
    fn search(&self, data: &DataSet, params: &Parameters) -> SearchResult<Graph> {
        let depth = params.get_int(parameters::DEPTH)?;
        let test = self.test.build(data, params)?;
        let output = Fas::new(test.as_ref())
            .with_depth(depth)
            .with_knowledge(self.knowledge.clone())
            .search()?;
        Ok(output.graph)
    }

    /// The pattern of the true DAG over its measured nodes: all an adjacency
    /// search over the data can recover.
    fn comparison_graph(&self, true_graph: &Graph) -> SearchResult<Graph> {
        Ok(pattern_for_dag(true_graph)?.measured_subgraph())
    }

    fn description(&self) -> String {
        format!("FAS (Fast Adjacency Search) using {}", self.test.description())
    }

    fn data_type(&self) -> DataType {
        self.test.data_type()
    }

    fn parameters(&self) -> Vec<&'static str> {
        let mut params = self.test.parameters();
        params.push(parameters::DEPTH);
        params
    }

    fn as_has_knowledge_mut(&mut self) -> Option<&mut dyn HasKnowledge> {
        Some(self)
    }
}

impl HasKnowledge for FasAlgorithm {
    fn knowledge(&self) -> &Knowledge {
        &self.knowledge
    }

    fn set_knowledge(&mut self, knowledge: Knowledge) {
        self.knowledge = knowledge;
    }
}
