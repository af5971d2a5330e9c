//! Linear SEM: each node is a weighted sum of its parents plus noise.

use std::collections::BTreeMap;

use causa_core::data::{DataSet, Variable};
use causa_core::errors::{ConfigError, GraphError, SearchResult};
use causa_core::graph::{EdgeKind, Graph};
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Uniform};
use rustc_hash::FxHashMap;

use super::Noise;

#[derive(Debug, Clone)]
pub struct LinearSem {
    graph: Graph,
    coefficients: BTreeMap<(String, String), f64>,
    noise: Noise,
}

impl LinearSem {
    /// Every edge coefficient starts at 1.0. `graph` must be a DAG.
    pub fn new(graph: Graph, noise: Noise) -> Result<Self, GraphError> {
        if let Some(edge) = graph.edges().into_iter().find(|e| e.kind != EdgeKind::Directed) {
            return Err(GraphError::NotADag {
                reason: format!("edge {edge} is not directed"),
            });
        }
        if !graph.is_acyclic() {
            return Err(GraphError::NotADag {
                reason: "directed cycle present".to_string(),
            });
        }
        let coefficients = graph
            .edges()
            .into_iter()
            .map(|e| ((e.node1, e.node2), 1.0))
            .collect();
        Ok(Self {
            graph,
            coefficients,
            noise,
        })
    }

    /// Coefficient magnitudes uniform in `[coef_low, coef_high]`, random sign.
    pub fn random(
        graph: Graph,
        coef_low: f64,
        coef_high: f64,
        noise: Noise,
        rng: &mut dyn RngCore,
    ) -> SearchResult<Self> {
        if !(coef_low >= 0.0 && coef_low <= coef_high && coef_high.is_finite()) {
            return Err(ConfigError::ValidationFailed {
                field: "coefLow".to_string(),
                message: format!("need 0 <= coefLow <= coefHigh, got {coef_low} and {coef_high}"),
            }
            .into());
        }
        let mut sem = Self::new(graph, noise)?;
        let magnitude = Uniform::new_inclusive(coef_low, coef_high);
        for value in sem.coefficients.values_mut() {
            let m = magnitude.sample(rng);
            *value = if rng.gen_bool(0.5) { m } else { -m };
        }
        Ok(sem)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn noise(&self) -> &Noise {
        &self.noise
    }

    pub fn coefficient(&self, from: &str, to: &str) -> Option<f64> {
        self.coefficients
            .get(&(from.to_string(), to.to_string()))
            .copied()
    }

    /// Set the coefficient of the existing edge `from --> to`.
    pub fn set_coefficient(&mut self, from: &str, to: &str, value: f64) -> Result<(), GraphError> {
        match self.coefficients.get_mut(&(from.to_string(), to.to_string())) {
            Some(c) => {
                *c = value;
                Ok(())
            }
            None => Err(GraphError::MissingEdge {
                node1: from.to_string(),
                node2: to.to_string(),
            }),
        }
    }

    /// `sample_size` rows over the measured nodes, in graph node order.
    pub fn simulate(&self, sample_size: usize, rng: &mut dyn RngCore) -> SearchResult<DataSet> {
        let order = self.graph.topological_order().ok_or_else(|| GraphError::NotADag {
            reason: "directed cycle present".to_string(),
        })?;

        let mut values: FxHashMap<String, Vec<f64>> = FxHashMap::default();
        for node in &order {
            let mut column: Vec<f64> = (0..sample_size).map(|_| self.noise.sample(rng)).collect();
            for parent in self.graph.parents(node) {
                let coef = self.coefficient(&parent, node).unwrap_or(0.0);
                if let Some(parent_values) = values.get(&parent) {
                    for (v, p) in column.iter_mut().zip(parent_values) {
                        *v += coef * p;
                    }
                }
            }
            values.insert(node.clone(), column);
        }

        let measured = self.graph.measured_names();
        let variables = measured.iter().map(|n| Variable::continuous(n.as_str())).collect();
        let columns = measured
            .iter()
            .map(|n| values.remove(n).unwrap_or_default())
            .collect();
        Ok(DataSet::from_columns("simulated", variables, columns)?)
    }
}
