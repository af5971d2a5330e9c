//! Pairwise orientation of an initial algorithm's output.

use causa_core::data::{DataSet, DataType};
use causa_core::errors::{ConfigError, SearchResult};
use causa_core::graph::Graph;
use causa_core::knowledge::Knowledge;
use causa_core::parameters::{self, Parameters};

use super::{execute, Algorithm, HasKnowledge, TakesInitialGraph};
use crate::orientation::{Lofs, Rule};

/// Runs an initial algorithm, then orients its edges with one [`Rule`].
pub struct PairwiseOrientation {
    rule: Rule,
    initial: Option<Box<dyn Algorithm>>,
    knowledge: Knowledge,
}

impl PairwiseOrientation {
    pub fn new(rule: Rule) -> Self {
        Self {
            rule,
            initial: None,
            knowledge: Knowledge::default(),
        }
    }

    pub fn with_initial(rule: Rule, initial: Box<dyn Algorithm>) -> Self {
        let mut alg = Self::new(rule);
        alg.set_initial_graph(initial);
        alg
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }
}

impl Algorithm for PairwiseOrientation {
    fn search(&self, data: &DataSet, params: &Parameters) -> SearchResult<Graph> {
        let initial = self.initial.as_deref().ok_or_else(|| ConfigError::MissingGraphSource {
            algorithm: self.rule.name().to_string(),
        })?;
        let epsilon = params.get_float(parameters::ORIENTATION_EPSILON)?;

        let skeleton = execute(initial, data, params)?;
        Lofs::new(self.rule)
            .with_epsilon(epsilon)
            .with_knowledge(self.knowledge.clone())
            .orient(&skeleton, &data.continuous_subset())
    }

    fn comparison_graph(&self, true_graph: &Graph) -> SearchResult<Graph> {
        Ok(true_graph.clone())
    }

    fn description(&self) -> String {
        let base = match self.rule {
            Rule::R4 => "R4, restriction of LING".to_string(),
            other => format!("{other} pairwise orientation"),
        };
        match &self.initial {
            Some(initial) => format!("{base} with initial graph from {}", initial.description()),
            None => base,
        }
    }

    fn data_type(&self) -> DataType {
        DataType::Continuous
    }

    fn parameters(&self) -> Vec<&'static str> {
        let mut params = self
            .initial
            .as_ref()
            .map(|a| a.parameters())
            .unwrap_or_default();
        params.push(parameters::ORIENTATION_EPSILON);
        params
    }

    fn as_has_knowledge_mut(&mut self) -> Option<&mut dyn HasKnowledge> {
        Some(self)
    }

    fn as_takes_initial_graph_mut(&mut self) -> Option<&mut dyn TakesInitialGraph> {
        Some(self)
    }
}

impl HasKnowledge for PairwiseOrientation {
    fn knowledge(&self) -> &Knowledge {
        &self.knowledge
    }

    /// Also hands the knowledge to the initial algorithm, when it takes any.
    fn set_knowledge(&mut self, knowledge: Knowledge) {
        if let Some(k) = self
            .initial
            .as_mut()
            .and_then(|a| a.as_has_knowledge_mut())
        {
            k.set_knowledge(knowledge.clone());
        }
        self.knowledge = knowledge;
    }
}

impl TakesInitialGraph for PairwiseOrientation {
    fn set_initial_graph(&mut self, mut algorithm: Box<dyn Algorithm>) {
        if !self.knowledge.is_empty() {
            if let Some(k) = algorithm.as_has_knowledge_mut() {
                k.set_knowledge(self.knowledge.clone());
            }
        }
        self.initial = Some(algorithm);
    }

    fn initial_graph(&self) -> Option<&dyn Algorithm> {
        self.initial.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::FasAlgorithm;
    use crate::independence::FisherZWrapper;
    use causa_core::data::Variable;
    use causa_core::errors::{CausaErrorCode, SearchError};

    fn data() -> DataSet {
        DataSet::from_columns(
            "c",
            vec![Variable::continuous("A"), Variable::continuous("B")],
            vec![vec![0.1, 0.5, 0.9, 1.3, 0.2], vec![1.0, 0.2, 0.3, 0.8, 0.6]],
        )
        .unwrap()
    }

    #[test]
    fn test_missing_graph_source() {
        let alg = PairwiseOrientation::new(Rule::R4);
        let err = execute(&alg, &data(), &Parameters::with_defaults()).unwrap_err();
        assert!(matches!(
            err,
            SearchError::Config(ConfigError::MissingGraphSource { .. })
        ));
        assert_eq!(err.error_code(), "MISSING_GRAPH_SOURCE");
        assert!(err.to_string().contains("graph source"));
    }

    #[test]
    fn test_parameters_include_initial() {
        let alg = PairwiseOrientation::with_initial(
            Rule::R4,
            Box::new(FasAlgorithm::new(Box::new(FisherZWrapper))),
        );
        assert_eq!(alg.parameters(), vec!["alpha", "depth", "orientationEpsilon"]);
        assert_eq!(
            alg.description(),
            "R4, restriction of LING with initial graph from FAS (Fast Adjacency Search) using Fisher Z test"
        );
    }

    #[test]
    fn test_knowledge_reaches_initial_algorithm() {
        let mut alg = PairwiseOrientation::with_initial(
            Rule::Skew,
            Box::new(FasAlgorithm::new(Box::new(FisherZWrapper))),
        );
        let mut k = Knowledge::new();
        k.set_required("A", "B");
        alg.set_knowledge(k.clone());

        let mut initial = alg.initial.take().unwrap();
        assert_eq!(initial.as_has_knowledge_mut().unwrap().knowledge(), &k);
    }

    #[test]
    fn test_comparison_graph_is_a_copy() {
        let mut truth = Graph::from_names(&["A", "B"]).unwrap();
        truth.add_directed_edge("A", "B").unwrap();
        let alg = PairwiseOrientation::new(Rule::Tanh);
        assert_eq!(alg.comparison_graph(&truth).unwrap(), truth);
    }
}
