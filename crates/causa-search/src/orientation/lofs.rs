//! LOFS: orient every edge of an initial graph by a pairwise rule.

use causa_core::data::DataSet;
use causa_core::errors::SearchResult;
use causa_core::graph::Graph;
use causa_core::knowledge::Knowledge;
use tracing::{debug, info_span};

use super::Rule;

#[derive(Debug, Clone)]
pub struct Lofs {
    rule: Rule,
    epsilon: f64,
    knowledge: Knowledge,
}

impl Lofs {
    pub fn new(rule: Rule) -> Self {
        Self {
            rule,
            epsilon: 0.0,
            knowledge: Knowledge::default(),
        }
    }

    /// Scores with `|score| <= epsilon` leave the edge undirected.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_knowledge(mut self, knowledge: Knowledge) -> Self {
        self.knowledge = knowledge;
        self
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    /// Same nodes and adjacencies as `initial`, edges re-oriented.
    ///
    /// Knowledge-fixed edges follow the knowledge. Edges with an endpoint
    /// that is not a continuous column of `data` stay undirected.
    pub fn orient(&self, initial: &Graph, data: &DataSet) -> SearchResult<Graph> {
        let _span = info_span!("lofs", rule = self.rule.id(), edges = initial.num_edges()).entered();
        self.knowledge.validate()?;

        let skeleton = initial.undirected_skeleton();
        let mut oriented = skeleton.clone();

        for edge in skeleton.edges() {
            let (a, b) = (edge.node1.as_str(), edge.node2.as_str());

            if let Some((from, to)) = self.knowledge.fixed_direction(a, b) {
                oriented.orient(&from, &to)?;
                continue;
            }

            let (Some(x), Some(y)) = (continuous_column(data, a), continuous_column(data, b)) else {
                debug!(a, b, "endpoint is not a continuous column; left undirected");
                continue;
            };

            let score = self.rule.score(x, y);
            if score > self.epsilon {
                oriented.orient(a, b)?;
            } else if score < -self.epsilon {
                oriented.orient(b, a)?;
            }
            debug!(a, b, score, "scored edge");
        }

        Ok(oriented)
    }
}

fn continuous_column<'d>(data: &'d DataSet, name: &str) -> Option<&'d [f64]> {
    data.variable(name)
        .filter(|v| v.is_continuous())
        .and_then(|_| data.column_by_name(name).ok())
}
