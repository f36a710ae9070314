//! Collision detection and scoring
//!
//! Everything is axis-aligned: the actor is a box, the top obstacle is a
//! fixed box hanging from above the playfield, and the bottom obstacle is a
//! box that starts below the gap and extends past the bottom edge.

use glam::Vec2;

use super::state::{Actor, Obstacle, Termination};
use crate::tuning::Tuning;

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap on x; shared edges do not count
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x
    }

    /// Strict overlap on y; shared edges do not count
    #[inline]
    pub fn overlaps_y(&self, other: &Rect) -> bool {
        self.min.y < other.max.y && self.max.y > other.min.y
    }
}

/// Result of evaluating one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    /// First death condition found this frame
    pub death: Option<Termination>,
    /// Obstacles cleared this frame
    pub scored: u32,
}

/// Actor bounding box
pub fn actor_rect(actor: &Actor, tuning: &Tuning) -> Rect {
    Rect::from_pos_size(
        Vec2::new(actor.x, actor.y),
        Vec2::new(tuning.actor_width, tuning.actor_height),
    )
}

/// Collision box of the top obstacle. Its height is the tuned constant, not
/// the sprite height.
pub fn top_obstacle_rect(obstacle: &Obstacle, tuning: &Tuning) -> Rect {
    Rect::from_pos_size(
        Vec2::new(obstacle.x, tuning.top_obstacle_y()),
        Vec2::new(tuning.obstacle_width, tuning.top_obstacle_height),
    )
}

/// Collision box of the bottom obstacle (unbounded below)
pub fn bottom_obstacle_rect(obstacle: &Obstacle, tuning: &Tuning) -> Rect {
    Rect {
        min: Vec2::new(obstacle.x, obstacle.bottom_obstacle_y(tuning.obstacle_gap)),
        max: Vec2::new(obstacle.right(tuning.obstacle_width), f32::INFINITY),
    }
}

/// Actor above the top edge or below the bottom edge. The edges themselves are safe.
#[inline]
pub fn out_of_bounds(actor: &Actor, screen_height: f32) -> bool {
    actor.y < 0.0 || actor.y > screen_height
}

/// Which part of `obstacle` the actor box runs into, top checked first
pub fn obstacle_hit(bounds: &Rect, obstacle: &Obstacle, tuning: &Tuning) -> Option<Termination> {
    let top = top_obstacle_rect(obstacle, tuning);
    if !bounds.overlaps_x(&top) {
        return None;
    }
    if bounds.overlaps_y(&top) {
        Some(Termination::TopObstacle)
    } else if bounds.overlaps_y(&bottom_obstacle_rect(obstacle, tuning)) {
        Some(Termination::BottomObstacle)
    } else {
        None
    }
}

/// First death condition: out of bounds, then obstacles in collection order
pub fn death_cause(actor: &Actor, obstacles: &[Obstacle], tuning: &Tuning) -> Option<Termination> {
    if out_of_bounds(actor, tuning.screen_height as f32) {
        return Some(Termination::OutOfBounds);
    }
    let bounds = actor_rect(actor, tuning);
    obstacles
        .iter()
        .find_map(|obstacle| obstacle_hit(&bounds, obstacle, tuning))
}

/// Check death conditions and mark cleared obstacles.
///
/// Scoring does not stop at the first death: every obstacle is still checked
/// for clearance in the same frame.
pub fn evaluate(actor: &Actor, obstacles: &mut [Obstacle], tuning: &Tuning) -> Evaluation {
    let mut eval = Evaluation {
        death: death_cause(actor, obstacles, tuning),
        scored: 0,
    };

    for obstacle in obstacles.iter_mut() {
        if obstacle.right(tuning.obstacle_width) < actor.x && !obstacle.passed {
            obstacle.passed = true;
            eval.scored += 1;
        }
    }

    eval
}
