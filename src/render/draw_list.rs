//! Recording canvas
//!
//! Stores draw commands instead of drawing them. Used headless and in tests.

use glam::Vec2;

use super::{Canvas, Rgb, Sprite};

/// One recorded call on the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgb),
    Sprite(Sprite, Vec2),
    Text(String, Vec2, Rgb),
    Present,
}

/// Canvas that records the current frame's commands
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    /// Window size and title, once created
    pub window: Option<(u32, u32, String)>,
    /// Commands since the last `clear`
    pub commands: Vec<DrawCommand>,
    /// Number of presented frames
    pub frames_presented: u64,
}

impl DrawList {
    pub fn sprite_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite(..)))
            .count()
    }

    /// Most recent text drawn in this frame
    pub fn last_text(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Text(text, ..) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for DrawList {
    fn create_window(&mut self, width: u32, height: u32, title: &str) {
        self.window = Some((width, height, title.to_string()));
    }

    fn clear(&mut self, color: Rgb) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2) {
        self.commands.push(DrawCommand::Sprite(sprite, pos));
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, color: Rgb) {
        self.commands
            .push(DrawCommand::Text(text.to_string(), pos, color));
    }

    fn present(&mut self) {
        self.commands.push(DrawCommand::Present);
        self.frames_presented += 1;
    }
}
