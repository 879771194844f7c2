//! Graph snapshot loading and saving
//!
//! Node placements arrive from the world-loading layer as a snapshot: every
//! node's position plus the indices of the nodes it links to. Snapshots can
//! be persisted in RON or JSON.

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A single placed node: where it sits and which nodes it links to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    /// World-space position
    pub position: Vec3,
    /// Indices of the nodes reachable from this one (one-way links)
    #[serde(default)]
    pub adjacent: Vec<u32>,
}

/// A serializable snapshot of every placed navigation node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Snapshot name
    pub name: String,
    /// Snapshot version for compatibility
    pub version: u32,
    /// All placed nodes, in arena order
    pub nodes: Vec<NodeSpec>,
}

impl GraphSnapshot {
    /// Create a new empty snapshot
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: 1,
            nodes: Vec::new(),
        }
    }

    /// Add a node placement, returning its arena index
    pub fn add_node(&mut self, position: Vec3, adjacent: Vec<u32>) -> u32 {
        let index = self.nodes.len() as u32;
        self.nodes.push(NodeSpec { position, adjacent });
        index
    }

    /// Number of placed nodes
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the snapshot has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Save the snapshot to a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SnapshotError::SerializeError(e.to_string()))?;
        fs::write(path, ron_string).map_err(|e| SnapshotError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load a snapshot from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path).map_err(|e| SnapshotError::IoError(e.to_string()))?;
        let snapshot: GraphSnapshot =
            ron::from_str(&content).map_err(|e| SnapshotError::DeserializeError(e.to_string()))?;
        Ok(snapshot)
    }

    /// Save the snapshot to a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let json_string = serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializeError(e.to_string()))?;
        fs::write(path, json_string).map_err(|e| SnapshotError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load a snapshot from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path).map_err(|e| SnapshotError::IoError(e.to_string()))?;
        let snapshot: GraphSnapshot = serde_json::from_str(&content)
            .map_err(|e| SnapshotError::DeserializeError(e.to_string()))?;
        Ok(snapshot)
    }
}

/// Errors that can occur during snapshot operations
#[derive(Debug, Clone)]
pub enum SnapshotError {
    /// IO error
    IoError(String),
    /// Serialization error
    SerializeError(String),
    /// Deserialization error
    DeserializeError(String),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::SerializeError(e) => write!(f, "Serialization error: {e}"),
            Self::DeserializeError(e) => write!(f, "Deserialization error: {e}"),
        }
    }
}

impl std::error::Error for SnapshotError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_round_trip_ron() {
        let mut snapshot = GraphSnapshot::new("courtyard");
        snapshot.add_node(Vec3::new(1.0, 2.0, 3.0), vec![1]);
        snapshot.add_node(Vec3::new(4.0, 5.0, 6.0), vec![0]);

        let ron_str =
            ron::ser::to_string_pretty(&snapshot, ron::ser::PrettyConfig::default()).unwrap();
        assert!(ron_str.contains("courtyard"));

        let loaded: GraphSnapshot = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded.name, "courtyard");
        assert_eq!(loaded.node_count(), 2);
        assert_eq!(loaded.nodes[0].adjacent, vec![1]);
        assert_eq!(loaded.nodes[1].position, Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_snapshot_round_trip_json() {
        let mut snapshot = GraphSnapshot::new("cellar");
        snapshot.add_node(Vec3::ZERO, vec![]);

        let json_str = serde_json::to_string(&snapshot).unwrap();
        let loaded: GraphSnapshot = serde_json::from_str(&json_str).unwrap();

        assert_eq!(loaded.name, "cellar");
        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.node_count(), 1);
        assert!(loaded.nodes[0].adjacent.is_empty());
    }
}
