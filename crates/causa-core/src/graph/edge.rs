use std::fmt;

use serde::{Deserialize, Serialize};

/// Edge mark. `Directed` always points from `node1` to `node2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Undirected,
    Directed,
    Bidirected,
}

/// An edge between two named nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub node1: String,
    pub node2: String,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn undirected(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            node1: a.into(),
            node2: b.into(),
            kind: EdgeKind::Undirected,
        }
    }

    /// `from --> to`.
    pub fn directed(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            node1: from.into(),
            node2: to.into(),
            kind: EdgeKind::Directed,
        }
    }

    pub fn bidirected(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            node1: a.into(),
            node2: b.into(),
            kind: EdgeKind::Bidirected,
        }
    }

    pub fn is_directed(&self) -> bool {
        self.kind == EdgeKind::Directed
    }

    /// Whether the edge has an arrowhead at `name`.
    pub fn points_toward(&self, name: &str) -> bool {
        match self.kind {
            EdgeKind::Undirected => false,
            EdgeKind::Directed => self.node2 == name,
            EdgeKind::Bidirected => self.node1 == name || self.node2 == name,
        }
    }

    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.node1 == a && self.node2 == b) || (self.node1 == b && self.node2 == a)
    }

    /// The endpoint opposite `name`, if `name` is an endpoint.
    pub fn other(&self, name: &str) -> Option<&str> {
        if self.node1 == name {
            Some(&self.node2)
        } else if self.node2 == name {
            Some(&self.node1)
        } else {
            None
        }
    }

    /// Symmetric edges with endpoints ordered by name, so equal edges
    /// compare equal regardless of insertion order.
    pub fn canonical(mut self) -> Self {
        if self.kind != EdgeKind::Directed && self.node2 < self.node1 {
            std::mem::swap(&mut self.node1, &mut self.node2);
        }
        self
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = match self.kind {
            EdgeKind::Undirected => "---",
            EdgeKind::Directed => "-->",
            EdgeKind::Bidirected => "<->",
        };
        write!(f, "{} {} {}", self.node1, mark, self.node2)
    }
}
