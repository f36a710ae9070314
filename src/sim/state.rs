//! Game state and entity types
//!
//! Entities carry their own one-frame physics step; everything else that
//! mutates them lives in `tick`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::spawner::Spawner;
use crate::tuning::Tuning;

/// Whether the session is still simulating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    /// Run ended; no further simulation
    Terminated,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Quit signal from the input collaborator
    Quit,
    /// Actor left the playfield vertically
    OutOfBounds,
    /// Actor hit the hanging top obstacle
    TopObstacle,
    /// Actor hit an obstacle below its gap
    BottomObstacle,
}

/// The player-controlled actor
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Fixed horizontal position
    pub x: f32,
    /// Top edge (screen coordinates, y grows downward)
    pub y: f32,
    /// Vertical velocity in pixels/frame (positive = falling)
    pub velocity: f32,
}

impl Actor {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, velocity: 0.0 }
    }

    /// Advance one frame: velocity first, then position with the new velocity
    #[inline]
    pub fn step(&mut self, gravity: f32) {
        self.velocity += gravity;
        self.y += self.velocity;
    }

    /// Override the current velocity with the upward impulse
    #[inline]
    pub fn fly(&mut self, impulse: f32) {
        self.velocity = impulse;
    }
}

/// One obstacle pair: a top obstacle and a bottom obstacle below the gap
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Leading (left) edge
    pub x: f32,
    /// Top of the gap; the bottom obstacle starts `obstacle_gap` below this
    pub gap_top: i32,
    /// Set once the actor has cleared this obstacle
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_top: i32) -> Self {
        Self {
            x,
            gap_top,
            passed: false,
        }
    }

    /// Scroll left by `speed` pixels
    #[inline]
    pub fn step(&mut self, speed: f32) {
        self.x -= speed;
    }

    /// Trailing (right) edge
    #[inline]
    pub fn right(&self, width: f32) -> f32 {
        self.x + width
    }

    /// Top edge of the bottom obstacle
    #[inline]
    pub fn bottom_obstacle_y(&self, gap: f32) -> f32 {
        self.gap_top as f32 + gap
    }
}

/// Complete per-session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for reproducible gap heights
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub actor: Actor,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub phase: SessionState,
    /// First cause that ended the session
    pub termination: Option<Termination>,
    pub spawner: Spawner,
    /// Simulated frames so far
    pub frame: u64,
}

impl GameState {
    /// Start a session; the spawn timer starts at `now_ms`
    pub fn new(tuning: Tuning, seed: u64, now_ms: f64) -> Self {
        debug_assert!(tuning.validate().is_ok(), "unvalidated tuning");
        let actor = Actor::new(tuning.actor_x, tuning.actor_start_y());
        let spawner = Spawner::new(tuning.spawn_interval_ms, now_ms);
        log::info!("Session started with seed {}", seed);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            actor,
            obstacles: Vec::new(),
            score: 0,
            phase: SessionState::Running,
            termination: None,
            spawner,
            frame: 0,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == SessionState::Running
    }

    /// End the session. Only the first cause is recorded.
    pub fn terminate(&mut self, cause: Termination) {
        if self.phase == SessionState::Terminated {
            return;
        }
        self.phase = SessionState::Terminated;
        self.termination = Some(cause);
        log::info!(
            "Session over ({:?}) at frame {} with score {}",
            cause,
            self.frame,
            self.score
        );
    }

    /// Append a new obstacle at the right edge with a random gap
    pub fn spawn_obstacle(&mut self) {
        let obstacle = super::spawner::spawn_obstacle(&mut self.rng, &self.tuning);
        log::debug!(
            "Spawned obstacle (gap_top {}) at frame {}",
            obstacle.gap_top,
            self.frame
        );
        self.obstacles.push(obstacle);
    }
}
