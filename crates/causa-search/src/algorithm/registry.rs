//! Explicit id → factory registry for algorithms and independence tests.

use std::collections::BTreeMap;

use causa_core::config::SearchConfig;
use causa_core::data::DataType;
use causa_core::errors::{ConfigError, SearchResult};
use serde::Serialize;

use super::{Algorithm, FasAlgorithm, PairwiseOrientation};
use crate::independence::{ChiSquareWrapper, FisherZWrapper, IndependenceWrapper};
use crate::orientation::Rule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmType {
    /// Produces an adjacency skeleton.
    Skeleton,
    /// Orients the edges of an initial graph.
    OrientPairwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleType {
    /// Needs an independence test.
    Test,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmMetadata {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub algorithm_type: AlgorithmType,
    pub oracle_type: OracleType,
    pub has_knowledge: bool,
    pub takes_initial_graph: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestMetadata {
    pub id: &'static str,
    pub name: &'static str,
    pub data_type: DataType,
}

pub type AlgorithmFactory =
    Box<dyn Fn(Option<Box<dyn IndependenceWrapper>>) -> SearchResult<Box<dyn Algorithm>> + Send + Sync>;
pub type TestFactory = Box<dyn Fn() -> Box<dyn IndependenceWrapper> + Send + Sync>;

pub struct AlgorithmRegistry {
    algorithms: BTreeMap<&'static str, (AlgorithmMetadata, AlgorithmFactory)>,
    tests: BTreeMap<&'static str, (TestMetadata, TestFactory)>,
}

impl AlgorithmRegistry {
    /// No entries.
    pub fn empty() -> Self {
        Self {
            algorithms: BTreeMap::new(),
            tests: BTreeMap::new(),
        }
    }

    /// `fas`, `r4`, `skew`, `rskew`, `tanh`; tests `fisher-z`, `chi-square`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();

        registry.register_algorithm(
            AlgorithmMetadata {
                id: "fas",
                name: "FAS",
                description: "Fast Adjacency Search: the skeleton implied by an independence test",
                algorithm_type: AlgorithmType::Skeleton,
                oracle_type: OracleType::Test,
                has_knowledge: true,
                takes_initial_graph: false,
            },
            Box::new(build_fas),
        );

        for (rule, description) in [
            (Rule::R4, "Pairwise orientation by the negentropy likelihood ratio"),
            (Rule::Skew, "Pairwise orientation by third moments"),
            (Rule::RSkew, "Pairwise orientation by a robust skewness measure"),
            (Rule::Tanh, "Pairwise orientation by the tanh nonlinearity"),
        ] {
            registry.register_algorithm(
                AlgorithmMetadata {
                    id: rule.id(),
                    name: rule.name(),
                    description,
                    algorithm_type: AlgorithmType::OrientPairwise,
                    oracle_type: OracleType::None,
                    has_knowledge: true,
                    takes_initial_graph: true,
                },
                Box::new(move |_: Option<Box<dyn IndependenceWrapper>>| -> SearchResult<Box<dyn Algorithm>> {
                    Ok(Box::new(PairwiseOrientation::new(rule)))
                }),
            );
        }

        registry.register_test(
            TestMetadata {
                id: "fisher-z",
                name: "Fisher Z",
                data_type: DataType::Continuous,
            },
            Box::new(|| Box::new(FisherZWrapper) as Box<dyn IndependenceWrapper>),
        );
        registry.register_test(
            TestMetadata {
                id: "chi-square",
                name: "Chi Square",
                data_type: DataType::Discrete,
            },
            Box::new(|| Box::new(ChiSquareWrapper) as Box<dyn IndependenceWrapper>),
        );

        registry
    }

    /// Replaces any entry with the same id.
    pub fn register_algorithm(&mut self, metadata: AlgorithmMetadata, factory: AlgorithmFactory) {
        self.algorithms.insert(metadata.id, (metadata, factory));
    }

    pub fn register_test(&mut self, metadata: TestMetadata, factory: TestFactory) {
        self.tests.insert(metadata.id, (metadata, factory));
    }

    pub fn algorithms(&self) -> impl Iterator<Item = &AlgorithmMetadata> {
        self.algorithms.values().map(|(m, _)| m)
    }

    pub fn tests(&self) -> impl Iterator<Item = &TestMetadata> {
        self.tests.values().map(|(m, _)| m)
    }

    pub fn metadata(&self, id: &str) -> Option<&AlgorithmMetadata> {
        self.algorithms.get(id).map(|(m, _)| m)
    }

    pub fn build_test(&self, id: &str) -> SearchResult<Box<dyn IndependenceWrapper>> {
        let (_, factory) = self
            .tests
            .get(id)
            .ok_or_else(|| ConfigError::UnknownIndependenceTest { id: id.to_string() })?;
        Ok(factory())
    }

    /// A fresh algorithm instance, with a fresh test when `test_id` is given.
    pub fn build(&self, id: &str, test_id: Option<&str>) -> SearchResult<Box<dyn Algorithm>> {
        let (_, factory) = self
            .algorithms
            .get(id)
            .ok_or_else(|| ConfigError::UnknownAlgorithm { id: id.to_string() })?;
        let test = test_id.map(|t| self.build_test(t)).transpose()?;
        factory(test)
    }

    /// An orienter fed by an initial algorithm, e.g. `("r4", "fas", "fisher-z")`.
    pub fn build_pipeline(
        &self,
        orienter_id: &str,
        initial_id: &str,
        test_id: &str,
    ) -> SearchResult<Box<dyn Algorithm>> {
        let mut orienter = self.build(orienter_id, None)?;
        let initial = self.build(initial_id, Some(test_id))?;
        match orienter.as_takes_initial_graph_mut() {
            Some(target) => target.set_initial_graph(initial),
            None => {
                return Err(ConfigError::ValidationFailed {
                    field: "orienter".to_string(),
                    message: format!("{orienter_id} does not take an initial graph"),
                }
                .into())
            }
        }
        Ok(orienter)
    }

    /// The first registered test for `data_type`, by id.
    pub fn default_test_for(&self, data_type: DataType) -> Option<&'static str> {
        self.tests().find(|m| m.data_type == data_type).map(|m| m.id)
    }

    /// The `search.rule` orienter over FAS with the `search.test` test. An
    /// unset test falls back to the default test for `data_type`.
    pub fn build_from_config(
        &self,
        config: &SearchConfig,
        data_type: DataType,
    ) -> SearchResult<Box<dyn Algorithm>> {
        let test_id = match config.test.as_deref() {
            Some(id) => id,
            None => self.default_test_for(data_type).ok_or_else(|| {
                ConfigError::MissingIndependenceTest {
                    algorithm: format!("fas on {} data", data_type.as_str()),
                }
            })?,
        };
        self.build_pipeline(config.effective_rule(), "fas", test_id)
    }
}

fn build_fas(test: Option<Box<dyn IndependenceWrapper>>) -> SearchResult<Box<dyn Algorithm>> {
    let test = test.ok_or_else(|| ConfigError::MissingIndependenceTest {
        algorithm: "fas".to_string(),
    })?;
    Ok(Box::new(FasAlgorithm::new(test)))
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use causa_core::errors::SearchError;

    #[test]
    fn test_default_ids() {
        let registry = AlgorithmRegistry::with_defaults();
        let ids: Vec<&str> = registry.algorithms().map(|m| m.id).collect();
        assert_eq!(ids, vec!["fas", "r4", "rskew", "skew", "tanh"]);
        let tests: Vec<&str> = registry.tests().map(|m| m.id).collect();
        assert_eq!(tests, vec!["chi-square", "fisher-z"]);
    }

    #[test]
    fn test_fas_needs_a_test() {
        let registry = AlgorithmRegistry::with_defaults();
        assert!(matches!(
            registry.build("fas", None),
            Err(SearchError::Config(ConfigError::MissingIndependenceTest { .. }))
        ));
        assert!(registry.build("fas", Some("fisher-z")).is_ok());
    }

    #[test]
    fn test_unknown_ids() {
        let registry = AlgorithmRegistry::with_defaults();
        assert!(matches!(
            registry.build("pc", None),
            Err(SearchError::Config(ConfigError::UnknownAlgorithm { .. }))
        ));
        assert!(matches!(
            registry.build("fas", Some("g-square")),
            Err(SearchError::Config(ConfigError::UnknownIndependenceTest { .. }))
        ));
    }

    #[test]
    fn test_pipeline() {
        let registry = AlgorithmRegistry::with_defaults();
        let alg = registry.build_pipeline("r4", "fas", "fisher-z").unwrap();
        assert_eq!(alg.parameters(), vec!["alpha", "depth", "orientationEpsilon"]);
        assert!(registry.build_pipeline("fas", "fas", "fisher-z").is_err());
    }

    #[test]
    fn test_build_from_config() {
        let registry = AlgorithmRegistry::with_defaults();
        assert_eq!(registry.default_test_for(DataType::Continuous), Some("fisher-z"));
        assert_eq!(registry.default_test_for(DataType::Discrete), Some("chi-square"));
        assert_eq!(registry.default_test_for(DataType::Mixed), None);

        let default = registry
            .build_from_config(&SearchConfig::default(), DataType::Continuous)
            .unwrap();
        assert_eq!(
            default.description(),
            "R4, restriction of LING with initial graph from FAS (Fast Adjacency Search) using Fisher Z test"
        );

        let config = SearchConfig {
            rule: Some("tanh".to_string()),
            ..Default::default()
        };
        let tanh = registry.build_from_config(&config, DataType::Discrete).unwrap();
        assert_eq!(
            tanh.description(),
            "Tanh pairwise orientation with initial graph from FAS (Fast Adjacency Search) using Chi-square test"
        );

        let config = SearchConfig {
            test: Some("g-square".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            registry.build_from_config(&config, DataType::Continuous),
            Err(SearchError::Config(ConfigError::UnknownIndependenceTest { .. }))
        ));
        assert!(matches!(
            registry.build_from_config(&SearchConfig::default(), DataType::Mixed),
            Err(SearchError::Config(ConfigError::MissingIndependenceTest { .. }))
        ));
    }

    #[test]
    fn test_metadata_serializes() {
        let registry = AlgorithmRegistry::with_defaults();
        let json = serde_json::to_value(registry.metadata("r4").unwrap()).unwrap();
        assert_eq!(json["algorithm_type"], "orient_pairwise");
        assert_eq!(json["takes_initial_graph"], true);
    }
}
