//! Fast Adjacency Search: the undirected skeleton implied by an
//! independence test.
//!
//! Starts from the complete graph and, for conditioning-set sizes
//! `d = 0, 1, 2, ...`, removes `x -- y` as soon as some `d`-subset of the
//! current neighbors of `x` (other than `y`) separates the pair. Subsets are
//! enumerated in lexicographic order of variable index, and adjacencies are
//! updated immediately, so the output is a pure function of the test's
//! verdicts.

pub mod choice;
pub mod sepset;

use std::collections::BTreeSet;

use causa_core::errors::SearchResult;
use causa_core::graph::Graph;
use causa_core::knowledge::Knowledge;
use causa_core::constants::UNBOUNDED_DEPTH;
use tracing::{debug, info, info_span};

use crate::independence::IndependenceTest;
pub use choice::ChoiceGenerator;
pub use sepset::SepsetMap;

/// Result of one adjacency search.
#[derive(Debug, Clone)]
pub struct FasOutput {
    /// Undirected skeleton over the test's variables.
    pub graph: Graph,
    pub sepsets: SepsetMap,
    /// Independence tests attempted, degenerate ones included.
    pub num_tests: usize,
    /// Tests that returned a `StatisticsError` and were skipped.
    pub num_degenerate: usize,
}

pub struct Fas<'a> {
    test: &'a dyn IndependenceTest,
    depth: i64,
    knowledge: Knowledge,
}

impl<'a> Fas<'a> {
    pub fn new(test: &'a dyn IndependenceTest) -> Self {
        Self {
            test,
            depth: UNBOUNDED_DEPTH,
            knowledge: Knowledge::default(),
        }
    }

    /// Largest conditioning set to try; negative means unbounded.
    pub fn with_depth(mut self, depth: i64) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_knowledge(mut self, knowledge: Knowledge) -> Self {
        self.knowledge = knowledge;
        self
    }

    pub fn search(&self) -> SearchResult<FasOutput> {
        self.knowledge.validate()?;

        let names = self.test.variables();
        let n = names.len();
        let max_depth = if self.depth < 0 {
            n.saturating_sub(2)
        } else {
            self.depth as usize
        };

        let _span = info_span!("fas", variables = n, depth = self.depth).entered();

        let mut adjacent: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
        for x in 0..n {
            for y in x + 1..n {
                if !self.knowledge.is_adjacency_forbidden(&names[x], &names[y]) {
                    adjacent[x].insert(y);
                    adjacent[y].insert(x);
                }
            }
        }

        let mut sepsets = SepsetMap::new();
        let mut num_tests = 0;
        let mut num_degenerate = 0;

        let mut d = 0;
        while d <= max_depth {
            for x in 0..n {
                let candidates: Vec<usize> = adjacent[x].iter().copied().collect();
                for y in candidates {
                    if !adjacent[x].contains(&y)
                        || self.knowledge.is_adjacency_required(&names[x], &names[y])
                    {
                        continue;
                    }
                    let others: Vec<usize> =
                        adjacent[x].iter().copied().filter(|&v| v != y).collect();

                    for z in ChoiceGenerator::new(&others, d) {
                        num_tests += 1;
                        match self.test.check(x, y, &z) {
                            Ok(result) if result.independent => {
                                adjacent[x].remove(&y);
                                adjacent[y].remove(&x);
                                let sepset: Vec<String> =
                                    z.iter().map(|&i| names[i].clone()).collect();
                                debug!(
                                    x = %names[x],
                                    y = %names[y],
                                    sepset = ?sepset,
                                    p = result.p_value,
                                    "removed adjacency"
                                );
                                sepsets.set(&names[x], &names[y], sepset);
                                break;
                            }
                            Ok(_) => {}
                            Err(e) => {
                                num_degenerate += 1;
                                debug!(x = %names[x], y = %names[y], error = %e, "skipped degenerate test");
                            }
                        }
                    }
                }
            }

            // Depth d + 1 needs some node with more than d other neighbors.
            let free_degree = adjacent
                .iter()
                .map(|a| a.len().saturating_sub(1))
                .max()
                .unwrap_or(0);
            if free_degree <= d {
                break;
            }
            d += 1;
        }

        let mut graph = Graph::from_names(names)?;
        for (x, neighbors) in adjacent.iter().enumerate() {
            for &y in neighbors.range(x + 1..) {
                graph.add_undirected_edge(&names[x], &names[y])?;
            }
        }

        info!(
            edges = graph.num_edges(),
            tests = num_tests,
            degenerate = num_degenerate,
            "adjacency search complete"
        );

        Ok(FasOutput {
            graph,
            sepsets,
            num_tests,
            num_degenerate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::independence::{DSeparation, TestResult};
    use causa_core::errors::StatisticsError;

    fn dag(edges: &[(&str, &str)], names: &[&str]) -> Graph {
        let mut g = Graph::from_names(names).unwrap();
        for (a, b) in edges {
            g.add_directed_edge(a, b).unwrap();
        }
        g
    }

    #[test]
    fn test_chain_skeleton_and_sepset() {
        let oracle = DSeparation::new(dag(&[("A", "B"), ("B", "C")], &["A", "B", "C"]));
        let out = Fas::new(&oracle).search().unwrap();
        assert!(out.graph.is_adjacent("A", "B"));
        assert!(out.graph.is_adjacent("B", "C"));
        assert!(!out.graph.is_adjacent("A", "C"));
        assert_eq!(out.sepsets.get("C", "A"), Some(&["B".to_string()][..]));
        assert_eq!(out.num_degenerate, 0);
    }

    #[test]
    fn test_depth_zero_cannot_condition() {
        let oracle = DSeparation::new(dag(&[("A", "B"), ("B", "C")], &["A", "B", "C"]));
        let out = Fas::new(&oracle).with_depth(0).search().unwrap();
        assert!(out.graph.is_adjacent("A", "C"));
    }

    #[test]
    fn test_knowledge_overrides_tests() {
        let oracle = DSeparation::new(dag(&[("A", "B")], &["A", "B", "C"]));
        let mut k = Knowledge::new();
        k.set_required("C", "A");
        k.forbid_adjacency("A", "B");
        let out = Fas::new(&oracle).with_knowledge(k).search().unwrap();
        assert!(out.graph.is_adjacent("A", "C"));
        assert!(!out.graph.is_adjacent("A", "B"));
    }

    #[test]
    fn test_conflicting_knowledge_rejected() {
        let oracle = DSeparation::new(dag(&[], &["A", "B"]));
        let mut k = Knowledge::new();
        k.set_required("A", "B");
        k.set_forbidden("A", "B");
        assert!(Fas::new(&oracle).with_knowledge(k).search().is_err());
    }

    /// Degenerate for every non-empty conditioning set.
    struct Flaky {
        variables: Vec<String>,
    }

    impl IndependenceTest for Flaky {
        fn variables(&self) -> &[String] {
            &self.variables
        }
        fn alpha(&self) -> f64 {
            0.05
        }
        fn check(&self, _x: usize, _y: usize, z: &[usize]) -> Result<TestResult, StatisticsError> {
            if z.is_empty() {
                Ok(TestResult::from_p_value(0.0, 0.05))
            } else {
                Err(StatisticsError::SingularMatrix {
                    context: "flaky".into(),
                })
            }
        }
        fn description(&self) -> String {
            "flaky".into()
        }
    }

    #[test]
    fn test_degenerate_subsets_are_skipped_and_counted() {
        let test = Flaky {
            variables: vec!["A".into(), "B".into(), "C".into()],
        };
        let out = Fas::new(&test).search().unwrap();
        assert_eq!(out.graph.num_edges(), 3);
        // Depth 0: 6 ordered visits. Depth 1: 6 visits, one subset each.
        assert_eq!(out.num_tests, 12);
        assert_eq!(out.num_degenerate, 6);
    }
}
