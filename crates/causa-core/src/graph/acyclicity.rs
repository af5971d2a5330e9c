//! Directed-cycle checks over the directed edges of a mixed graph.
//! Undirected and bidirected edges never participate in a cycle.

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::DiGraph;
use petgraph::stable_graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rustc_hash::{FxHashMap, FxHashSet};

use super::edge::EdgeKind;
use super::stable_graph::Graph;

/// Whether adding `from --> to` would close a directed cycle.
///
/// Self-loops always count as cycles. Otherwise a cycle appears exactly when
/// `to` already reaches `from`.
pub fn would_create_cycle(graph: &Graph, from: &str, to: &str) -> bool {
    if from == to {
        return true;
    }
    has_directed_path(graph, to, from)
}

/// DFS along directed edges: can `from` reach `to`?
pub fn has_directed_path(graph: &Graph, from: &str, to: &str) -> bool {
    let (Some(start), Some(goal)) = (graph.get_index(from), graph.get_index(to)) else {
        return false;
    };

    let mut stack = vec![start];
    let mut seen = FxHashSet::default();
    seen.insert(start);
    while let Some(current) = stack.pop() {
        if current == goal {
            return true;
        }
        for edge in graph.graph.edges_directed(current, Direction::Outgoing) {
            if *edge.weight() != EdgeKind::Directed {
                continue;
            }
            let next = edge.target();
            if seen.insert(next) {
                stack.push(next);
            }
        }
    }
    false
}

/// Strongly connected components with more than one node, i.e. the node
/// sets of directed cycles. Empty for a DAG.
pub fn find_cycles(graph: &Graph) -> Vec<Vec<String>> {
    let (projection, names) = directed_projection(graph);
    tarjan_scc(&projection)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|scc| scc.into_iter().map(|i| names[i.index()].clone()).collect())
        .collect()
}

/// Topological order of every node over directed edges, `None` if cyclic.
pub fn topological_order(graph: &Graph) -> Option<Vec<String>> {
    let (projection, names) = directed_projection(graph);
    toposort(&projection, None)
        .ok()
        .map(|order| order.into_iter().map(|i| names[i.index()].clone()).collect())
}

/// The directed edges only, as a compact `DiGraph` whose node `i` is the
/// `i`-th node of `graph` in insertion order.
fn directed_projection(graph: &Graph) -> (DiGraph<(), ()>, Vec<String>) {
    let mut projection = DiGraph::new();
    let mut positions: FxHashMap<NodeIndex, petgraph::graph::NodeIndex> = FxHashMap::default();
    let mut names = Vec::with_capacity(graph.num_nodes());

    for idx in graph.graph.node_indices() {
        positions.insert(idx, projection.add_node(()));
        names.push(graph.name_of(idx).unwrap_or_default().to_string());
    }

    for e in graph.graph.edge_indices() {
        if graph.graph.edge_weight(e) != Some(&EdgeKind::Directed) {
            continue;
        }
        let Some((source, target)) = graph.graph.edge_endpoints(e) else {
            continue;
        };
        if let (Some(&s), Some(&t)) = (positions.get(&source), positions.get(&target)) {
            projection.add_edge(s, t, ());
        }
    }

    (projection, names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Graph {
        let mut g = Graph::from_names(&["A", "B", "C"]).unwrap();
        g.add_directed_edge("A", "B").unwrap();
        g.add_directed_edge("B", "C").unwrap();
        g
    }

    #[test]
    fn test_would_create_cycle() {
        let g = chain();
        assert!(would_create_cycle(&g, "C", "A"));
        assert!(would_create_cycle(&g, "A", "A"));
        assert!(!would_create_cycle(&g, "A", "C"));
    }

    #[test]
    fn test_topological_order_respects_edges() {
        let g = chain();
        assert_eq!(g.topological_order().unwrap(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_undirected_edges_do_not_form_cycles() {
        let mut g = chain();
        g.add_undirected_edge("C", "A").unwrap();
        assert!(find_cycles(&g).is_empty());
    }

    #[test]
    fn test_find_cycles_reports_members() {
        let mut g = Graph::from_names(&["A", "B", "C"]).unwrap();
        g.add_directed_edge("A", "B").unwrap();
        g.add_directed_edge("B", "C").unwrap();
        g.add_edge(crate::graph::Edge::directed("C", "A")).unwrap();
        let cycles = find_cycles(&g);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 3);
        assert!(g.topological_order().is_none());
    }
}
