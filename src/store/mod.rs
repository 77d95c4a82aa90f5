use crate::error::ProcGapError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// One failure-tree node. Beyond `id` and `position` the document schema is
/// open; unknown fields (label, errorRate, type, ...) are carried verbatim
/// so a round trip never drops data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub position: Position,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailureTree {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

/// Exclusive owner of one failure-tree JSON document. The file location
/// comes from configuration; saves rewrite the whole document in place
/// (single-writer, no transactional guarantees).
pub struct FailureTreeStore {
    path: PathBuf,
    tree: FailureTree,
}

impl FailureTreeStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ProcGapError> {
        let path = path.into();
        let raw = fs::read_to_string(&path)?;
        let tree: FailureTree = serde_json::from_str(&raw)?;

        info!(
            path = %path.display(),
            nodes = tree.nodes.len(),
            connections = tree.connections.len(),
            "loaded failure tree"
        );

        Ok(Self { path, tree })
    }

    pub fn save(&self) -> Result<(), ProcGapError> {
        let raw = serde_json::to_string_pretty(&self.tree)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tree(&self) -> &FailureTree {
        &self.tree
    }

    pub fn nodes(&self) -> &[Node] {
        &self.tree.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.tree.connections
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.tree.nodes.iter().find(|n| n.id == id)
    }

    /// Merges `updates` into the node's open fields; a `position` key is
    /// applied to the typed position instead.
    pub fn update_node(
        &mut self,
        id: &str,
        updates: Map<String, Value>,
    ) -> Result<&Node, ProcGapError> {
        let node = self
            .tree
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| ProcGapError::NodeNotFound { id: id.to_string() })?;

        for (key, value) in updates {
            if key == "position" {
                node.position = serde_json::from_value(value)?;
            } else {
                node.fields.insert(key, value);
            }
        }

        Ok(node)
    }

    pub fn add_connection(&mut self, connection: Connection) {
        self.tree.connections.push(connection);
    }

    pub fn remove_connection(&mut self, id: &str) -> Result<(), ProcGapError> {
        let before = self.tree.connections.len();
        self.tree.connections.retain(|c| c.id != id);

        if self.tree.connections.len() == before {
            return Err(ProcGapError::EdgeNotFound { id: id.to_string() });
        }
        Ok(())
    }
}
