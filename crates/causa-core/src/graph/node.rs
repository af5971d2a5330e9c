use serde::{Deserialize, Serialize};

/// Whether a node corresponds to an observed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    #[default]
    Measured,
    Latent,
}

/// A graph vertex, identified by its unique name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub node_type: NodeType,
}

impl Node {
    pub fn measured(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: NodeType::Measured,
        }
    }

    pub fn latent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: NodeType::Latent,
        }
    }

    pub fn is_latent(&self) -> bool {
        self.node_type == NodeType::Latent
    }
}
