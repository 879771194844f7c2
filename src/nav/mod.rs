//! Navigation module
//!
//! Node graph representation, spatial node queries, and A* pathfinding over
//! designer-placed waypoints.

mod graph;
mod pathfinding;
mod snapshot;

pub use graph::{GraphError, NavGraph, NavNode, NodeId};
pub use pathfinding::{Path, path_between, random_path};
pub use snapshot::{GraphSnapshot, NodeSpec, SnapshotError};
