//! Gameplay state module
//!
//! Simple character state shared with the HUD layer.

mod health;

pub use health::{Health, HealthDisplay};
