//! Platform abstraction layer
//!
//! Handles headless/browser differences for:
//! - Time and frame pacing
//! - Input events
//! - Drawing surface (see `render::Canvas`)

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::{ScriptedInput, SimulatedClock};

use crate::sim::InputEvent;

/// Non-blocking source of discrete input events
pub trait InputSource {
    /// Take every event pending since the last call
    fn drain(&mut self) -> Vec<InputEvent>;
}

/// Monotonic time and frame pacing
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> f64;
    /// Wait out the remainder of the current frame at `target_fps`
    fn limit_rate(&mut self, target_fps: u32);
}
