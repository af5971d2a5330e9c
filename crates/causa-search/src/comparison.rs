//! Adjacency and arrowhead precision/recall of an estimated graph.

use std::collections::BTreeSet;

use causa_core::graph::{EdgeKind, Graph};
use serde::{Deserialize, Serialize};

/// Counts and ratios. A ratio with a zero denominator is `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphComparison {
    pub adjacency_tp: usize,
    pub adjacency_fp: usize,
    pub adjacency_fn: usize,
    pub arrowhead_tp: usize,
    pub arrowhead_fp: usize,
    pub arrowhead_fn: usize,
}

impl GraphComparison {
    pub fn adjacency_precision(&self) -> f64 {
        ratio(self.adjacency_tp, self.adjacency_tp + self.adjacency_fp)
    }

    pub fn adjacency_recall(&self) -> f64 {
        ratio(self.adjacency_tp, self.adjacency_tp + self.adjacency_fn)
    }

    pub fn arrowhead_precision(&self) -> f64 {
        ratio(self.arrowhead_tp, self.arrowhead_tp + self.arrowhead_fp)
    }

    pub fn arrowhead_recall(&self) -> f64 {
        ratio(self.arrowhead_tp, self.arrowhead_tp + self.arrowhead_fn)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        f64::NAN
    } else {
        num as f64 / den as f64
    }
}

/// Compare `estimated` against `truth` by node name.
pub fn compare(truth: &Graph, estimated: &Graph) -> GraphComparison {
    let (true_adj, true_arrows) = marks(truth);
    let (est_adj, est_arrows) = marks(estimated);

    GraphComparison {
        adjacency_tp: est_adj.intersection(&true_adj).count(),
        adjacency_fp: est_adj.difference(&true_adj).count(),
        adjacency_fn: true_adj.difference(&est_adj).count(),
        arrowhead_tp: est_arrows.intersection(&true_arrows).count(),
        arrowhead_fp: est_arrows.difference(&true_arrows).count(),
        arrowhead_fn: true_arrows.difference(&est_arrows).count(),
    }
}

type Pair = (String, String);

/// Unordered adjacencies, and arrowheads as `(tail side, head)`.
fn marks(graph: &Graph) -> (BTreeSet<Pair>, BTreeSet<Pair>) {
    let mut adjacencies = BTreeSet::new();
    let mut arrowheads = BTreeSet::new();
    for edge in graph.edges() {
        let (a, b) = (edge.node1.clone(), edge.node2.clone());
        adjacencies.insert(if a <= b { (a.clone(), b.clone()) } else { (b.clone(), a.clone()) });
        match edge.kind {
            EdgeKind::Directed => {
                arrowheads.insert((a, b));
            }
            EdgeKind::Bidirected => {
                arrowheads.insert((a.clone(), b.clone()));
                arrowheads.insert((b, a));
            }
            EdgeKind::Undirected => {}
        }
    }
    (adjacencies, arrowheads)
}
