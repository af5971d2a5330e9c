//! Graph, pattern and knowledge behavior through the public API.

use causa_core::graph::{acyclicity, pattern_for_dag, EdgeKind, Graph, Node, NodeType};
use causa_core::{GraphError, Knowledge};
use proptest::prelude::*;

fn names(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("X{i}")).collect()
}

/// GR-01: pattern of a chain is fully undirected.
#[test]
fn test_pattern_of_chain_is_undirected() {
    let mut g = Graph::from_names(&["X1", "X2", "X3"]).unwrap();
    g.add_directed_edge("X1", "X2").unwrap();
    g.add_directed_edge("X2", "X3").unwrap();
    let p = pattern_for_dag(&g).unwrap();
    assert_eq!(p.num_edges(), 2);
    assert!(p.edges().iter().all(|e| e.kind == EdgeKind::Undirected));
}

/// GR-02: pattern of a collider keeps both arrows.
#[test]
fn test_pattern_of_collider_keeps_arrows() {
    let mut g = Graph::from_names(&["X1", "X2", "X3"]).unwrap();
    g.add_directed_edge("X1", "X2").unwrap();
    g.add_directed_edge("X3", "X2").unwrap();
    let p = pattern_for_dag(&g).unwrap();
    assert!(p.is_parent_of("X1", "X2"));
    assert!(p.is_parent_of("X3", "X2"));
}

/// GR-03: pattern rejects cyclic and non-directed input.
#[test]
fn test_pattern_rejects_non_dag() {
    let mut g = Graph::from_names(&["A", "B"]).unwrap();
    g.add_undirected_edge("A", "B").unwrap();
    assert!(matches!(pattern_for_dag(&g), Err(GraphError::NotADag { .. })));
}

/// GR-04: latent nodes survive empty copies.
#[test]
fn test_empty_copy_keeps_node_types() {
    let mut g = Graph::from_nodes([Node::measured("M"), Node::latent("L")]).unwrap();
    g.add_directed_edge("L", "M").unwrap();
    let copy = g.empty_copy();
    assert_eq!(copy.num_edges(), 0);
    assert_eq!(copy.node("L").unwrap().node_type, NodeType::Latent);
    assert_eq!(copy.measured_names(), vec!["M"]);
}

/// GR-05: knowledge is a value; clones never alias.
#[test]
fn test_knowledge_clones_are_independent() {
    let mut k1 = Knowledge::new();
    k1.set_required("X1", "X2");
    let mut k2 = k1.clone();
    k2.forbid_adjacency("X1", "X3");
    assert!(k1.forbidden_edges().next().is_none());
    assert!(k2.is_adjacency_forbidden("X3", "X1"));
    assert!(k2.is_adjacency_required("X2", "X1"));
}

proptest! {
    /// GR-P1: edges added along a fixed order never form a cycle, and the
    /// pattern of any DAG keeps its skeleton.
    #[test]
    fn prop_forward_edges_stay_acyclic(
        n in 2usize..8,
        picks in proptest::collection::vec((0usize..8, 0usize..8), 0..20),
    ) {
        let names = names(n);
        let mut g = Graph::from_names(&names).unwrap();
        for (a, b) in picks {
            let (a, b) = (a % n, b % n);
            if a == b {
                continue;
            }
            let (from, to) = if a < b { (a, b) } else { (b, a) };
            let _ = g.add_directed_edge(&names[from], &names[to]);
        }
        prop_assert!(g.is_acyclic());
        prop_assert!(acyclicity::find_cycles(&g).is_empty());

        let pattern = pattern_for_dag(&g).unwrap();
        prop_assert_eq!(pattern.undirected_skeleton(), g.undirected_skeleton());
    }
}
