//! `StableGraph` wrapper with a name → `NodeIndex` map.
//!
//! Every adjacency is stored as exactly one petgraph edge. The weight carries
//! the mark; a `Directed` weight points from the stored source to the stored
//! target, while undirected and bidirected edges ignore the stored direction.

use std::collections::BTreeSet;
use std::fmt;

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rustc_hash::FxHashMap;

use super::acyclicity;
use super::edge::{Edge, EdgeKind};
use super::node::{Node, NodeType};
use crate::errors::GraphError;

/// A mutable mixed graph over uniquely named nodes.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub(crate) graph: StableDiGraph<Node, EdgeKind>,
    index: FxHashMap<String, NodeIndex>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node)?;
        }
        Ok(graph)
    }

    /// A graph of measured nodes with no edges.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, GraphError> {
        Self::from_nodes(names.iter().map(|n| Node::measured(n.as_ref())))
    }

    /// Same nodes, no edges.
    pub fn empty_copy(&self) -> Self {
        let mut copy = Self::new();
        for node in self.nodes() {
            let idx = copy.graph.add_node(node.clone());
            copy.index.insert(node.name.clone(), idx);
        }
        copy
    }

    /// Same nodes and adjacencies, every edge undirected.
    pub fn undirected_skeleton(&self) -> Self {
        let mut copy = self.empty_copy();
        for edge in self.edges() {
            let a = copy.index[&edge.node1];
            let b = copy.index[&edge.node2];
            copy.graph.add_edge(a, b, EdgeKind::Undirected);
        }
        copy
    }

    /// Measured nodes only, with the edges among them.
    pub fn measured_subgraph(&self) -> Self {
        let mut copy = Self::new();
        for node in self.nodes().into_iter().filter(|n| !n.is_latent()) {
            let idx = copy.graph.add_node(node.clone());
            copy.index.insert(node.name.clone(), idx);
        }
        for edge in self.edges() {
            if let (Some(a), Some(b)) = (copy.get_index(&edge.node1), copy.get_index(&edge.node2)) {
                copy.graph.add_edge(a, b, edge.kind);
            }
        }
        copy
    }

    // ---- nodes ----

    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.index.contains_key(&node.name) {
            return Err(GraphError::DuplicateNode { name: node.name });
        }
        let name = node.name.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(name, idx);
        Ok(())
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.index
            .get(name)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    pub fn set_node_type(&mut self, name: &str, node_type: NodeType) -> Result<(), GraphError> {
        let idx = self.require(name)?;
        if let Some(node) = self.graph.node_weight_mut(idx) {
            node.node_type = node_type;
        }
        Ok(())
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> Vec<&Node> {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx))
            .collect()
    }

    pub fn node_names(&self) -> Vec<String> {
        self.nodes().into_iter().map(|n| n.name.clone()).collect()
    }

    pub fn measured_names(&self) -> Vec<String> {
        self.nodes()
            .into_iter()
            .filter(|n| !n.is_latent())
            .map(|n| n.name.clone())
            .collect()
    }

    pub fn num_nodes(&self) -> usize {
        self.graph.node_count()
    }

    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    // ---- edges ----

    /// Add an edge. Rejects unknown endpoints, self-loops and a second edge
    /// between an already adjacent pair.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        let a = self.require(&edge.node1)?;
        let b = self.require(&edge.node2)?;
        if a == b {
            return Err(GraphError::SelfLoop { name: edge.node1 });
        }
        if self.find(a, b).is_some() {
            return Err(GraphError::DuplicateEdge {
                node1: edge.node1,
                node2: edge.node2,
            });
        }
        self.graph.add_edge(a, b, edge.kind);
        Ok(())
    }

    pub fn add_undirected_edge(&mut self, a: &str, b: &str) -> Result<(), GraphError> {
        self.add_edge(Edge::undirected(a, b))
    }

    pub fn add_directed_edge(&mut self, from: &str, to: &str) -> Result<(), GraphError> {
        self.add_edge(Edge::directed(from, to))
    }

    pub fn add_bidirected_edge(&mut self, a: &str, b: &str) -> Result<(), GraphError> {
        self.add_edge(Edge::bidirected(a, b))
    }

    /// `add_directed_edge`, refusing an edge that would close a directed cycle.
    pub fn add_acyclic_edge(&mut self, from: &str, to: &str) -> Result<(), GraphError> {
        self.require(from)?;
        self.require(to)?;
        if from != to && acyclicity::would_create_cycle(self, from, to) {
            return Err(GraphError::CycleDetected {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        self.add_directed_edge(from, to)
    }

    /// Remove the edge between `a` and `b`, whatever its mark.
    pub fn remove_edge(&mut self, a: &str, b: &str) -> Option<Edge> {
        let e = self.find(self.get_index(a)?, self.get_index(b)?)?;
        let edge = self.to_edge(e)?;
        self.graph.remove_edge(e);
        Some(edge)
    }

    pub fn edge(&self, a: &str, b: &str) -> Option<Edge> {
        let e = self.find(self.get_index(a)?, self.get_index(b)?)?;
        self.to_edge(e)
    }

    pub fn is_adjacent(&self, a: &str, b: &str) -> bool {
        match (self.get_index(a), self.get_index(b)) {
            (Some(ia), Some(ib)) => self.find(ia, ib).is_some(),
            _ => false,
        }
    }

    /// `from --> to` is present.
    pub fn is_parent_of(&self, from: &str, to: &str) -> bool {
        self.edge(from, to)
            .is_some_and(|e| e.is_directed() && e.node1 == from)
    }

    pub fn is_undirected(&self, a: &str, b: &str) -> bool {
        self.edge(a, b).is_some_and(|e| e.kind == EdgeKind::Undirected)
    }

    /// Edges ordered by the insertion order of their endpoints. Symmetric
    /// edges list the earlier node first.
    pub fn edges(&self) -> Vec<Edge> {
        let mut keyed: Vec<((usize, usize), Edge)> = self
            .graph
            .edge_indices()
            .filter_map(|e| {
                let (s, t) = self.graph.edge_endpoints(e)?;
                let mut edge = self.to_edge(e)?;
                if edge.kind != EdgeKind::Directed && s.index() > t.index() {
                    std::mem::swap(&mut edge.node1, &mut edge.node2);
                }
                let key = (s.index().min(t.index()), s.index().max(t.index()));
                Some((key, edge))
            })
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        keyed.into_iter().map(|(_, edge)| edge).collect()
    }

    /// Edges in canonical form, for order-independent comparison.
    pub fn edge_set(&self) -> BTreeSet<Edge> {
        self.edges().into_iter().map(Edge::canonical).collect()
    }

    /// Replace the edge between `from` and `to` with `from --> to`.
    pub fn orient(&mut self, from: &str, to: &str) -> Result<(), GraphError> {
        self.set_edge(Edge::directed(from, to))
    }

    /// `orient`, refusing an orientation that would close a directed cycle.
    pub fn orient_acyclic(&mut self, from: &str, to: &str) -> Result<(), GraphError> {
        let removed = self.remove_edge(from, to).ok_or_else(|| GraphError::MissingEdge {
            node1: from.to_string(),
            node2: to.to_string(),
        })?;
        if acyclicity::would_create_cycle(self, from, to) {
            self.add_edge(removed)?;
            return Err(GraphError::CycleDetected {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        self.add_directed_edge(from, to)
    }

    /// Replace whatever edge connects `edge.node1` and `edge.node2` with `edge`.
    pub fn set_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        let a = self.require(&edge.node1)?;
        let b = self.require(&edge.node2)?;
        let e = self.find(a, b).ok_or_else(|| GraphError::MissingEdge {
            node1: edge.node1.clone(),
            node2: edge.node2.clone(),
        })?;
        self.graph.remove_edge(e);
        self.graph.add_edge(a, b, edge.kind);
        Ok(())
    }

    // ---- adjacency queries ----

    /// Adjacent nodes in insertion order. Unknown names have no neighbors.
    pub fn neighbors(&self, name: &str) -> Vec<String> {
        let Some(idx) = self.get_index(name) else {
            return Vec::new();
        };
        let mut adjacent: Vec<NodeIndex> = self.graph.neighbors_undirected(idx).collect();
        adjacent.sort_unstable();
        adjacent.dedup();
        self.names_of(&adjacent)
    }

    /// Nodes `p` with `p --> name`.
    pub fn parents(&self, name: &str) -> Vec<String> {
        self.directed_neighbors(name, Direction::Incoming)
    }

    /// Nodes `c` with `name --> c`.
    pub fn children(&self, name: &str) -> Vec<String> {
        self.directed_neighbors(name, Direction::Outgoing)
    }

    pub fn in_degree(&self, name: &str) -> usize {
        self.count_directed(name, Direction::Incoming)
    }

    pub fn out_degree(&self, name: &str) -> usize {
        self.count_directed(name, Direction::Outgoing)
    }

    /// Number of edges touching `name`, whatever their marks.
    pub fn degree(&self, name: &str) -> usize {
        self.get_index(name)
            .map_or(0, |idx| self.graph.neighbors_undirected(idx).count())
    }

    /// `ancestor` reaches `descendant` along directed edges (or they are equal).
    pub fn is_ancestor_of(&self, ancestor: &str, descendant: &str) -> bool {
        if !self.contains_node(ancestor) || !self.contains_node(descendant) {
            return false;
        }
        ancestor == descendant || acyclicity::has_directed_path(self, ancestor, descendant)
    }

    /// No directed cycle exists.
    pub fn is_acyclic(&self) -> bool {
        acyclicity::find_cycles(self).is_empty()
    }

    /// A topological order of all nodes over directed edges, `None` if cyclic.
    pub fn topological_order(&self) -> Option<Vec<String>> {
        acyclicity::topological_order(self)
    }

    // ---- internals ----

    pub(crate) fn get_index(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    fn require(&self, name: &str) -> Result<NodeIndex, GraphError> {
        self.get_index(name).ok_or_else(|| GraphError::UnknownNode {
            name: name.to_string(),
        })
    }

    fn find(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge_undirected(a, b).map(|(e, _)| e)
    }

    fn to_edge(&self, e: EdgeIndex) -> Option<Edge> {
        let (s, t) = self.graph.edge_endpoints(e)?;
        Some(Edge {
            node1: self.graph.node_weight(s)?.name.clone(),
            node2: self.graph.node_weight(t)?.name.clone(),
            kind: *self.graph.edge_weight(e)?,
        })
    }

    pub(crate) fn name_of(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(|n| n.name.as_str())
    }

    fn names_of(&self, indices: &[NodeIndex]) -> Vec<String> {
        indices
            .iter()
            .filter_map(|&idx| self.name_of(idx).map(str::to_string))
            .collect()
    }

    fn directed_neighbors(&self, name: &str, direction: Direction) -> Vec<String> {
        let Some(idx) = self.get_index(name) else {
            return Vec::new();
        };
        let mut found: Vec<NodeIndex> = self
            .graph
            .edges_directed(idx, direction)
            .filter(|e| *e.weight() == EdgeKind::Directed)
            .map(|e| match direction {
                Direction::Incoming => e.source(),
                Direction::Outgoing => e.target(),
            })
            .collect();
        found.sort_unstable();
        self.names_of(&found)
    }

    fn count_directed(&self, name: &str, direction: Direction) -> usize {
        self.get_index(name).map_or(0, |idx| {
            self.graph
                .edges_directed(idx, direction)
                .filter(|e| *e.weight() == EdgeKind::Directed)
                .count()
        })
    }
}

impl PartialEq for Graph {
    /// Same node names and types, same canonical edge set.
    fn eq(&self, other: &Self) -> bool {
        let nodes = |g: &Graph| -> BTreeSet<(String, NodeType)> {
            g.nodes()
                .into_iter()
                .map(|n| (n.name.clone(), n.node_type))
                .collect()
        };
        nodes(self) == nodes(other) && self.edge_set() == other.edge_set()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graph Nodes:")?;
        writeln!(f, "{}", self.node_names().join(";"))?;
        writeln!(f)?;
        writeln!(f, "Graph Edges:")?;
        for (i, edge) in self.edges().iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, edge)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Graph {
        Graph::from_names(&["A", "B", "C"]).unwrap()
    }

    #[test]
    fn test_rejects_self_loop_and_duplicate() {
        let mut g = abc();
        assert_eq!(
            g.add_directed_edge("A", "A").unwrap_err(),
            GraphError::SelfLoop { name: "A".into() }
        );
        g.add_directed_edge("A", "B").unwrap();
        assert!(matches!(
            g.add_undirected_edge("B", "A").unwrap_err(),
            GraphError::DuplicateEdge { .. }
        ));
        assert!(matches!(
            g.add_undirected_edge("A", "Q").unwrap_err(),
            GraphError::UnknownNode { .. }
        ));
    }

    #[test]
    fn test_orient_replaces_mark() {
        let mut g = abc();
        g.add_undirected_edge("A", "B").unwrap();
        g.orient("B", "A").unwrap();
        assert!(g.is_parent_of("B", "A"));
        assert_eq!(g.parents("A"), vec!["B"]);
        assert_eq!(g.children("B"), vec!["A"]);
        assert_eq!(g.num_edges(), 1);
    }

    #[test]
    fn test_acyclic_mutations_report_cycles() {
        let mut g = abc();
        g.add_acyclic_edge("A", "B").unwrap();
        g.add_acyclic_edge("B", "C").unwrap();
        assert_eq!(
            g.add_acyclic_edge("C", "A").unwrap_err(),
            GraphError::CycleDetected { from: "C".into(), to: "A".into() }
        );
        assert!(!g.is_adjacent("C", "A"));

        g.add_undirected_edge("A", "C").unwrap();
        assert_eq!(
            g.orient_acyclic("C", "A").unwrap_err(),
            GraphError::CycleDetected { from: "C".into(), to: "A".into() }
        );
        assert!(g.is_undirected("A", "C"));
        g.orient_acyclic("A", "C").unwrap();
        assert!(g.is_parent_of("A", "C"));
        assert!(g.is_acyclic());
    }

    #[test]
    fn test_measured_subgraph_drops_latents() {
        let mut g = abc();
        g.set_node_type("B", NodeType::Latent).unwrap();
        g.add_directed_edge("B", "A").unwrap();
        g.add_directed_edge("B", "C").unwrap();
        g.add_directed_edge("A", "C").unwrap();
        let measured = g.measured_subgraph();
        assert_eq!(measured.node_names(), vec!["A", "C"]);
        assert_eq!(measured.num_edges(), 1);
        assert!(measured.is_parent_of("A", "C"));
    }

    #[test]
    fn test_orient_missing_edge() {
        let mut g = abc();
        assert!(matches!(
            g.orient("A", "C").unwrap_err(),
            GraphError::MissingEdge { .. }
        ));
    }

    #[test]
    fn test_degrees_and_neighbors() {
        let mut g = abc();
        g.add_directed_edge("A", "B").unwrap();
        g.add_undirected_edge("C", "B").unwrap();
        assert_eq!(g.neighbors("B"), vec!["A", "C"]);
        assert_eq!(g.in_degree("B"), 1);
        assert_eq!(g.out_degree("B"), 0);
        assert_eq!(g.degree("B"), 2);
    }

    #[test]
    fn test_ancestry_follows_directed_edges_only() {
        let mut g = abc();
        g.add_directed_edge("A", "B").unwrap();
        g.add_undirected_edge("B", "C").unwrap();
        assert!(g.is_ancestor_of("A", "B"));
        assert!(!g.is_ancestor_of("A", "C"));
        assert!(g.is_ancestor_of("C", "C"));
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let mut g1 = abc();
        g1.add_undirected_edge("A", "B").unwrap();
        g1.add_directed_edge("B", "C").unwrap();

        let mut g2 = Graph::from_names(&["C", "B", "A"]).unwrap();
        g2.add_directed_edge("B", "C").unwrap();
        g2.add_undirected_edge("B", "A").unwrap();

        assert_eq!(g1, g2);
    }

    #[test]
    fn test_display_lists_nodes_and_edges() {
        let mut g = abc();
        g.add_directed_edge("A", "B").unwrap();
        let text = g.to_string();
        assert!(text.contains("A;B;C"));
        assert!(text.contains("1. A --> B"));
    }
}
