//! AI module
//!
//! Finite state machines, steering behaviors, and the enemy agent that
//! consumes navigation paths.

mod enemy;
mod fsm;
mod steering;

pub use enemy::{Attack, Chase, Enemy, EnemyConfig, EnemyContext, FreeRoam, PathRequest};
pub use fsm::{State, StateMachine, Transition};
pub use steering::{Arrive, Seek, Steering};
