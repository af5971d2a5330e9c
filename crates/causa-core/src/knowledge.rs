//! Background knowledge: required and forbidden directed edges.
//!
//! Knowledge is a plain value. Each algorithm instance owns its own copy,
//! so concurrent searches never alias one another's constraints.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Knowledge {
    /// Directed edges `(from, to)` that must be present.
    required: BTreeSet<(String, String)>,
    /// Directed edges `(from, to)` that must be absent.
    forbidden: BTreeSet<(String, String)>,
}

impl Knowledge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.forbidden.is_empty()
    }

    pub fn set_required(&mut self, from: &str, to: &str) {
        self.required.insert((from.to_string(), to.to_string()));
    }

    pub fn remove_required(&mut self, from: &str, to: &str) {
        self.required.remove(&(from.to_string(), to.to_string()));
    }

    pub fn set_forbidden(&mut self, from: &str, to: &str) {
        self.forbidden.insert((from.to_string(), to.to_string()));
    }

    pub fn remove_forbidden(&mut self, from: &str, to: &str) {
        self.forbidden.remove(&(from.to_string(), to.to_string()));
    }

    /// Forbid both directions, i.e. forbid `a` and `b` from being adjacent.
    pub fn forbid_adjacency(&mut self, a: &str, b: &str) {
        self.set_forbidden(a, b);
        self.set_forbidden(b, a);
    }

    pub fn is_required(&self, from: &str, to: &str) -> bool {
        self.required
            .contains(&(from.to_string(), to.to_string()))
    }

    pub fn is_forbidden(&self, from: &str, to: &str) -> bool {
        self.forbidden
            .contains(&(from.to_string(), to.to_string()))
    }

    /// An adjacency is required when either direction is required.
    pub fn is_adjacency_required(&self, a: &str, b: &str) -> bool {
        self.is_required(a, b) || self.is_required(b, a)
    }

    /// An adjacency is forbidden only when both directions are forbidden.
    pub fn is_adjacency_forbidden(&self, a: &str, b: &str) -> bool {
        self.is_forbidden(a, b) && self.is_forbidden(b, a)
    }

    /// The direction knowledge fixes for the pair, if any: a required
    /// direction, or the only direction left when the other is forbidden.
    pub fn fixed_direction(&self, a: &str, b: &str) -> Option<(String, String)> {
        if self.is_required(a, b) || (self.is_forbidden(b, a) && !self.is_forbidden(a, b)) {
            Some((a.to_string(), b.to_string()))
        } else if self.is_required(b, a) || (self.is_forbidden(a, b) && !self.is_forbidden(b, a)) {
            Some((b.to_string(), a.to_string()))
        } else {
            None
        }
    }

    pub fn required_edges(&self) -> impl Iterator<Item = &(String, String)> {
        self.required.iter()
    }

    pub fn forbidden_edges(&self) -> impl Iterator<Item = &(String, String)> {
        self.forbidden.iter()
    }

    /// Union of both constraint sets.
    pub fn merge(&mut self, other: &Knowledge) {
        self.required.extend(other.required.iter().cloned());
        self.forbidden.extend(other.forbidden.iter().cloned());
    }

    /// Reject an edge that is both required and forbidden.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.required.intersection(&self.forbidden).next() {
            Some((from, to)) => Err(ValidationError::ConflictingKnowledge {
                from: from.clone(),
                to: to.clone(),
            }),
            None => Ok(()),
        }
    }
}
