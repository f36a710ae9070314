//! Frame rendering
//!
//! The simulation never draws. Each frame the loop controller hands the game
//! state to `draw_frame`, which issues draw commands to a `Canvas` supplied by
//! the platform.

pub mod draw_list;

pub use draw_list::{DrawCommand, DrawList};

use glam::Vec2;

use crate::sim::GameState;

/// RGB color
pub type Rgb = [u8; 3];

/// Colors for game elements
pub mod colors {
    use super::Rgb;

    pub const BACKGROUND: Rgb = [0, 0, 0];
    pub const SCORE_TEXT: Rgb = [255, 255, 255];
}

/// Image handles owned by the platform. The flipped obstacle is derived once
/// at load time and reused for every top obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Actor,
    Obstacle,
    ObstacleFlipped,
}

/// Drawing surface provided by the platform layer
pub trait Canvas {
    /// Size and title the output surface. Called once before the first frame.
    fn create_window(&mut self, width: u32, height: u32, title: &str);
    fn clear(&mut self, color: Rgb);
    /// Draw a sprite with its top-left corner at `pos`
    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2);
    /// Draw text with its top-left corner at `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Rgb);
    fn present(&mut self);
}

/// HUD score label
pub fn score_label(score: u32) -> String {
    format!("Score: {}", score)
}

/// Issue every draw command for the current state
pub fn draw_frame<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) {
    let tuning = &state.tuning;

    canvas.clear(colors::BACKGROUND);
    canvas.draw_sprite(Sprite::Actor, Vec2::new(state.actor.x, state.actor.y));

    let top_y = tuning.top_obstacle_y();
    for obstacle in &state.obstacles {
        canvas.draw_sprite(Sprite::ObstacleFlipped, Vec2::new(obstacle.x, top_y));
        canvas.draw_sprite(
            Sprite::Obstacle,
            Vec2::new(obstacle.x, obstacle.bottom_obstacle_y(tuning.obstacle_gap)),
        );
    }

    canvas.draw_text(
        &score_label(state.score),
        Vec2::new(tuning.score_text_x, tuning.score_text_y),
        colors::SCORE_TEXT,
    );
    canvas.present();
}
