//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One frame per tick, fixed per-frame constants
//! - Seeded RNG only
//! - Time only through the `now_ms` passed into `tick`
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Evaluation, Rect, death_cause, evaluate};
pub use spawner::Spawner;
pub use state::{Actor, GameState, Obstacle, SessionState, Termination};
pub use tick::{InputEvent, Key, TickInput, TickOutcome, tick};
