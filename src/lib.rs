//! Flappy Gap - a side-scrolling gap-flying reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `render`: Draw-command surface and per-frame scene submission
//! - `platform`: Input, clock and canvas collaborators (headless and browser)
//! - `tuning`: Data-driven game balance
//! - `game`: Frame loop controller tying the above together

pub mod game;
pub mod platform;
pub mod render;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use tuning::{Tuning, TuningError};

/// Default gameplay constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: u32 = 900;
    pub const SCREEN_HEIGHT: u32 = 600;

    /// Actor sprite size, matching the bird image
    pub const ACTOR_WIDTH: f32 = 90.0;
    pub const ACTOR_HEIGHT: f32 = 90.0;
    /// Fixed horizontal position of the actor
    pub const ACTOR_X: f32 = 50.0;

    /// Obstacle sprite size, matching the pipe image
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    pub const OBSTACLE_HEIGHT: f32 = 280.0;

    /// Velocity set by a fly impulse (negative = upward)
    pub const FLY_IMPULSE: f32 = -10.0;
    /// Velocity added every frame
    pub const GRAVITY: f32 = 0.4;
    /// Target frame rate
    pub const FPS: u32 = 60;

    /// Vertical gap between the gap top and the bottom obstacle
    pub const OBSTACLE_GAP: f32 = 150.0;
    /// How far the top obstacle hangs into the playfield
    pub const TOP_OBSTACLE_OFFSET: f32 = 70.0;
    /// Collision height of the top obstacle. Not derived from the sprite (280).
    pub const TOP_OBSTACLE_HEIGHT: f32 = 300.0;

    /// Horizontal obstacle speed (pixels per frame)
    pub const OBSTACLE_SPEED: f32 = 8.0;
    /// Wall-clock time between spawns
    pub const SPAWN_INTERVAL_MS: f64 = 1500.0;
    /// Obstacles at or left of this x are removed
    pub const CULL_THRESHOLD_X: f32 = -50.0;

    /// Inclusive bounds for a new obstacle's gap top
    pub const MIN_GAP_TOP: i32 = 100;
    pub const MAX_GAP_TOP: i32 = SCREEN_HEIGHT as i32 - 250;

    /// Score HUD placement
    pub const SCORE_TEXT_X: f32 = 10.0;
    pub const SCORE_TEXT_Y: f32 = 10.0;
    pub const FONT_SIZE: f32 = 40.0;
}
