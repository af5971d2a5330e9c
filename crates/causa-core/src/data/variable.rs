use serde::{Deserialize, Serialize};

/// How a variable's cells are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum VariableKind {
    /// Real-valued.
    Continuous,
    /// Categorical, encoded as integers in `0..num_categories`.
    Discrete { num_categories: u32 },
}

/// A named column of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub kind: VariableKind,
}

impl Variable {
    pub fn continuous(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: VariableKind::Continuous,
        }
    }

    pub fn discrete(name: impl Into<String>, num_categories: u32) -> Self {
        Self {
            name: name.into(),
            kind: VariableKind::Discrete { num_categories },
        }
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self.kind, VariableKind::Continuous)
    }

    pub fn is_discrete(&self) -> bool {
        matches!(self.kind, VariableKind::Discrete { .. })
    }

    /// Category count for discrete variables, `None` for continuous ones.
    pub fn num_categories(&self) -> Option<u32> {
        match self.kind {
            VariableKind::Discrete { num_categories } => Some(num_categories),
            VariableKind::Continuous => None,
        }
    }
}
