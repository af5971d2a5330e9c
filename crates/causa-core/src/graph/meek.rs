//! Meek orientation rules R1–R3 (Meek 1995), applied to a fixpoint.

use super::edge::EdgeKind;
use super::stable_graph::Graph;

/// Orient undirected edges forced by R1–R3 until no rule fires.
/// Returns the number of edges oriented.
pub fn apply_meek_rules(graph: &mut Graph) -> usize {
    let mut oriented = 0;
    loop {
        let mut changed = false;
        let undirected: Vec<(String, String)> = graph
            .edges()
            .into_iter()
            .filter(|e| e.kind == EdgeKind::Undirected)
            .map(|e| (e.node1, e.node2))
            .collect();

        for (a, b) in undirected {
            if !graph.is_undirected(&a, &b) {
                continue;
            }
            let direction = if implied(graph, &a, &b) {
                Some((a, b))
            } else if implied(graph, &b, &a) {
                Some((b, a))
            } else {
                None
            };
            if let Some((from, to)) = direction {
                if graph.orient_acyclic(&from, &to).is_ok() {
                    oriented += 1;
                    changed = true;
                }
            }
        }

        if !changed {
            return oriented;
        }
    }
}

/// Whether some rule forces the undirected edge `from --- to` to `from --> to`.
fn implied(graph: &Graph, from: &str, to: &str) -> bool {
    // R1: p --> from --- to, p and to nonadjacent.
    if graph
        .parents(from)
        .iter()
        .any(|p| !graph.is_adjacent(p, to))
    {
        return true;
    }

    // R2: from --> m --> to.
    if graph
        .children(from)
        .iter()
        .any(|m| graph.is_parent_of(m, to))
    {
        return true;
    }

    // R3: from --- c --> to, from --- d --> to, c and d nonadjacent.
    let kites: Vec<String> = graph
        .neighbors(from)
        .into_iter()
        .filter(|c| c != to && graph.is_undirected(from, c) && graph.is_parent_of(c, to))
        .collect();
    kites.iter().enumerate().any(|(i, c)| {
        kites[i + 1..]
            .iter()
            .any(|d| !graph.is_adjacent(c, d))
    })
}
