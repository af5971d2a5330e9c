//! Pattern (CPDAG) of a DAG: the Markov equivalence class representative
//! that an adjacency search plus orientation rules can at best recover.

use super::edge::EdgeKind;
use super::meek::apply_meek_rules;
use super::stable_graph::Graph;
use crate::errors::GraphError;

/// Skeleton of `dag` with its unshielded colliders oriented, closed under
/// Meek rules R1–R3.
pub fn pattern_for_dag(dag: &Graph) -> Result<Graph, GraphError> {
    if let Some(edge) = dag.edges().into_iter().find(|e| e.kind != EdgeKind::Directed) {
        return Err(GraphError::NotADag {
            reason: format!("edge {edge} is not directed"),
        });
    }
    if !dag.is_acyclic() {
        return Err(GraphError::NotADag {
            reason: "directed cycle present".to_string(),
        });
    }

    let mut pattern = dag.undirected_skeleton();
    for child in dag.node_names() {
        let parents = dag.parents(&child);
        for (i, a) in parents.iter().enumerate() {
            for b in &parents[i + 1..] {
                if !dag.is_adjacent(a, b) {
                    pattern.orient(a, &child)?;
                    pattern.orient(b, &child)?;
                }
            }
        }
    }

    apply_meek_rules(&mut pattern);
    Ok(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_pattern_is_undirected() {
        let mut dag = Graph::from_names(&["X1", "X2", "X3"]).unwrap();
        dag.add_directed_edge("X1", "X2").unwrap();
        dag.add_directed_edge("X2", "X3").unwrap();
        let pattern = pattern_for_dag(&dag).unwrap();
        assert!(pattern.is_undirected("X1", "X2"));
        assert!(pattern.is_undirected("X2", "X3"));
    }

    #[test]
    fn test_collider_and_descendant_are_oriented() {
        let mut dag = Graph::from_names(&["A", "B", "C", "D"]).unwrap();
        dag.add_directed_edge("A", "C").unwrap();
        dag.add_directed_edge("B", "C").unwrap();
        dag.add_directed_edge("C", "D").unwrap();
        let pattern = pattern_for_dag(&dag).unwrap();
        assert!(pattern.is_parent_of("A", "C"));
        assert!(pattern.is_parent_of("B", "C"));
        assert!(pattern.is_parent_of("C", "D"));
    }

    #[test]
    fn test_rejects_undirected_input() {
        let mut g = Graph::from_names(&["A", "B"]).unwrap();
        g.add_undirected_edge("A", "B").unwrap();
        assert!(matches!(
            pattern_for_dag(&g).unwrap_err(),
            GraphError::NotADag { .. }
        ));
    }
}
