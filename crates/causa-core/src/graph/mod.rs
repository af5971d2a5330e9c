//! Mixed graphs over named nodes: undirected, directed and bidirected edges.

pub mod acyclicity;
pub mod edge;
pub mod meek;
pub mod node;
pub mod pattern;
pub mod stable_graph;

pub use edge::{Edge, EdgeKind};
pub use node::{Node, NodeType};
pub use pattern::pattern_for_dag;
pub use stable_graph::Graph;
