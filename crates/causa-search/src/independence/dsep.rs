//! D-separation oracle over a DAG.
//!
//! Answers with certainty: p-value 1 when d-separated, 0 otherwise. Only
//! measured nodes are exposed, but paths may run through latent nodes.

use causa_core::data::{DataSet, DataType};
use causa_core::errors::{SearchResult, StatisticsError};
use causa_core::graph::Graph;
use causa_core::parameters::Parameters;
use rustc_hash::FxHashSet;

use super::{IndependenceTest, IndependenceWrapper, TestResult};

/// Whether `x` and `y` are d-separated by `z` in the directed part of `graph`.
///
/// Reachability search over (node, arrival direction) states: a trail may
/// pass a non-collider outside `z`, and a collider whose descendants meet `z`.
pub fn is_d_separated(graph: &Graph, x: &str, y: &str, z: &[&str]) -> bool {
    if x == y {
        return false;
    }
    let given: FxHashSet<&str> = z.iter().copied().collect();
    if given.contains(x) || given.contains(y) {
        return true;
    }

    // `z` together with its ancestors: colliders in this set are open.
    let mut opens_collider: FxHashSet<String> = FxHashSet::default();
    let mut stack: Vec<String> = z.iter().map(|s| s.to_string()).collect();
    while let Some(node) = stack.pop() {
        if opens_collider.insert(node.clone()) {
            stack.extend(graph.parents(&node));
        }
    }

    // `true` = arrived from a child (moving up), `false` = from a parent.
    let mut visited: FxHashSet<(String, bool)> = FxHashSet::default();
    let mut frontier = vec![(x.to_string(), true)];
    while let Some((node, up)) = frontier.pop() {
        if !visited.insert((node.clone(), up)) {
            continue;
        }
        let blocked = given.contains(node.as_str());
        if node == y && !blocked {
            return false;
        }
        if up && !blocked {
            frontier.extend(graph.parents(&node).into_iter().map(|p| (p, true)));
            frontier.extend(graph.children(&node).into_iter().map(|c| (c, false)));
        } else if !up {
            if !blocked {
                frontier.extend(graph.children(&node).into_iter().map(|c| (c, false)));
            }
            if opens_collider.contains(&node) {
                frontier.extend(graph.parents(&node).into_iter().map(|p| (p, true)));
            }
        }
    }
    true
}

/// Graph oracle usable wherever a statistical test is.
#[derive(Debug, Clone)]
pub struct DSeparation {
    graph: Graph,
    variables: Vec<String>,
}

impl DSeparation {
    pub fn new(graph: Graph) -> Self {
        let variables = graph.measured_names();
        Self { graph, variables }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }
}

impl IndependenceTest for DSeparation {
    fn variables(&self) -> &[String] {
        &self.variables
    }

    fn alpha(&self) -> f64 {
        0.5
    }

    fn check(&self, x: usize, y: usize, z: &[usize]) -> Result<TestResult, StatisticsError> {
        let z: Vec<&str> = z.iter().map(|&i| self.variables[i].as_str()).collect();
        let separated = is_d_separated(&self.graph, &self.variables[x], &self.variables[y], &z);
        Ok(TestResult {
            independent: separated,
            p_value: if separated { 1.0 } else { 0.0 },
        })
    }

    fn description(&self) -> String {
        "D-separation oracle".to_string()
    }
}

/// Wraps a fixed true graph; ignores the dataset.
#[derive(Debug, Clone)]
pub struct DSeparationWrapper {
    graph: Graph,
}

impl DSeparationWrapper {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }
}

impl IndependenceWrapper for DSeparationWrapper {
    fn id(&self) -> &'static str {
        "d-separation"
    }

    fn description(&self) -> String {
        "D-separation oracle".to_string()
    }

    fn data_type(&self) -> DataType {
        DataType::Mixed
    }

    fn parameters(&self) -> Vec<&'static str> {
        Vec::new()
    }

    fn build(&self, _data: &DataSet, _params: &Parameters) -> SearchResult<Box<dyn IndependenceTest>> {
        Ok(Box::new(DSeparation::new(self.graph.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use causa_core::graph::Node;

    fn graph(edges: &[(&str, &str)], names: &[&str]) -> Graph {
        let mut g = Graph::from_names(names).unwrap();
        for (a, b) in edges {
            g.add_directed_edge(a, b).unwrap();
        }
        g
    }

    #[test]
    fn test_chain() {
        let g = graph(&[("A", "B"), ("B", "C")], &["A", "B", "C"]);
        assert!(!is_d_separated(&g, "A", "C", &[]));
        assert!(is_d_separated(&g, "A", "C", &["B"]));
    }

    #[test]
    fn test_fork() {
        let g = graph(&[("B", "A"), ("B", "C")], &["A", "B", "C"]);
        assert!(!is_d_separated(&g, "A", "C", &[]));
        assert!(is_d_separated(&g, "A", "C", &["B"]));
    }

    #[test]
    fn test_collider_and_descendant() {
        let g = graph(&[("A", "C"), ("B", "C"), ("C", "D")], &["A", "B", "C", "D"]);
        assert!(is_d_separated(&g, "A", "B", &[]));
        assert!(!is_d_separated(&g, "A", "B", &["C"]));
        assert!(!is_d_separated(&g, "A", "B", &["D"]));
    }

    #[test]
    fn test_latent_confounder_hidden_from_variables() {
        let mut g = Graph::from_nodes([Node::measured("A"), Node::measured("B"), Node::latent("L")]).unwrap();
        g.add_directed_edge("L", "A").unwrap();
        g.add_directed_edge("L", "B").unwrap();
        let oracle = DSeparation::new(g);
        assert_eq!(oracle.variables(), ["A".to_string(), "B".to_string()]);
        assert!(!oracle.check(0, 1, &[]).unwrap().independent);
    }
}
