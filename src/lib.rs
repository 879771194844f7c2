//! A first-person pursuit game core built in Rust
//!
//! This crate provides:
//! - Node-graph navigation with A* pathfinding over designer-placed nodes
//! - Enemy agents that roam the graph and chase a sensed target
//! - Gameplay state shared with the HUD layer

pub mod ai;
pub mod game;
pub mod nav;

// Re-exports for convenience
pub use glam;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::ai::{Enemy, EnemyConfig, State, StateMachine, Transition};
    pub use crate::game::{Health, HealthDisplay};
    pub use crate::nav::{
        GraphError, GraphSnapshot, NavGraph, NodeId, Path, path_between, random_path,
    };
    pub use glam::Vec3;
}
