//! Game balance and playfield tuning
//!
//! Defaults reproduce the classic feel. A JSON file may override any subset
//! of fields; anything missing falls back to the default.

use serde::Deserialize;
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Gameplay and playfield constants for one session
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub screen_width: u32,
    pub screen_height: u32,
    /// Window/document title
    pub title: String,

    // === Actor ===
    pub actor_x: f32,
    pub actor_width: f32,
    pub actor_height: f32,
    /// Velocity set by a fly impulse (negative = upward)
    pub fly_impulse: f32,
    /// Velocity added every frame
    pub gravity: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    /// Rendered sprite height (not used for collision)
    pub obstacle_height: f32,
    pub obstacle_gap: f32,
    pub top_obstacle_offset: f32,
    /// Collision height of the fixed top obstacle
    pub top_obstacle_height: f32,
    /// Pixels per frame
    pub obstacle_speed: f32,
    pub spawn_interval_ms: f64,
    pub cull_threshold_x: f32,
    pub min_gap_top: i32,
    pub max_gap_top: i32,

    // === Timing ===
    pub fps: u32,

    // === HUD ===
    pub score_text_x: f32,
    pub score_text_y: f32,
    pub font_size: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            title: "Flappy Bird".to_string(),

            actor_x: ACTOR_X,
            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,
            fly_impulse: FLY_IMPULSE,
            gravity: GRAVITY,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_gap: OBSTACLE_GAP,
            top_obstacle_offset: TOP_OBSTACLE_OFFSET,
            top_obstacle_height: TOP_OBSTACLE_HEIGHT,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            cull_threshold_x: CULL_THRESHOLD_X,
            min_gap_top: MIN_GAP_TOP,
            max_gap_top: MAX_GAP_TOP,

            fps: FPS,

            score_text_x: SCORE_TEXT_X,
            score_text_y: SCORE_TEXT_Y,
            font_size: FONT_SIZE,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a JSON tuning from disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check that the constants describe a playable field
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(TuningError::Invalid(
                "playfield dimensions must be non-zero".into(),
            ));
        }
        if self.fps == 0 {
            return Err(TuningError::Invalid("fps must be non-zero".into()));
        }
        if self.spawn_interval_ms.is_nan() || self.spawn_interval_ms <= 0.0 {
            return Err(TuningError::Invalid(
                "spawn_interval_ms must be positive".into(),
            ));
        }
        if self.obstacle_speed < 0.0 {
            return Err(TuningError::Invalid(
                "obstacle_speed must not be negative".into(),
            ));
        }
        if self.actor_width <= 0.0 || self.actor_height <= 0.0 || self.obstacle_width <= 0.0 {
            return Err(TuningError::Invalid("sprite sizes must be positive".into()));
        }
        if self.min_gap_top > self.max_gap_top {
            return Err(TuningError::Invalid(format!(
                "min_gap_top ({}) exceeds max_gap_top ({})",
                self.min_gap_top, self.max_gap_top
            )));
        }
        if self.max_gap_top as f32 + self.obstacle_gap > self.screen_height as f32 {
            return Err(TuningError::Invalid(format!(
                "gap of {} below max_gap_top {} does not fit a {} px playfield",
                self.obstacle_gap, self.max_gap_top, self.screen_height
            )));
        }
        Ok(())
    }

    /// Duration of one frame at the target rate
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.fps as f64
    }

    /// Top edge of the fixed top obstacle
    pub fn top_obstacle_y(&self) -> f32 {
        self.top_obstacle_offset - self.top_obstacle_height
    }

    /// Actor starts vertically centred
    pub fn actor_start_y(&self) -> f32 {
        self.screen_height as f32 / 2.0
    }
}
