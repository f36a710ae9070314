//! Browser collaborators: 2D canvas, keyboard queue and `performance.now()`

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use glam::Vec2;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement, Performance,
};

use super::{Clock, InputSource};
use crate::render::{Canvas, Rgb, Sprite};
use crate::sim::{InputEvent, Key};

/// Startup failures in the browser frontend
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("no browser window or document")]
    NoWindow,
    #[error("canvas element #{0} not found")]
    MissingCanvas(String),
    #[error("2D canvas context unavailable")]
    NoContext,
    #[error("failed to load image {src}: {reason}")]
    Image { src: String, reason: String },
    #[error("browser call failed: {0}")]
    Js(String),
}

fn js_err(e: wasm_bindgen::JsValue) -> AssetError {
    AssetError::Js(format!("{:?}", e))
}

fn css_color([r, g, b]: Rgb) -> String {
    format!("rgb({}, {}, {})", r, g, b)
}

/// Fetch and decode an image
async fn load_image(src: &str) -> Result<HtmlImageElement, AssetError> {
    let image = HtmlImageElement::new().map_err(js_err)?;
    image.set_src(src);
    JsFuture::from(image.decode())
        .await
        .map_err(|e| AssetError::Image {
            src: src.to_string(),
            reason: format!("{:?}", e),
        })?;
    Ok(image)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, AssetError> {
    canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or(AssetError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| AssetError::NoContext)
}

/// Render `image` upside down onto an offscreen canvas, once
fn flip_vertically(
    document: &Document,
    image: &HtmlImageElement,
) -> Result<HtmlCanvasElement, AssetError> {
    let flipped: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| AssetError::NoContext)?;
    flipped.set_width(image.natural_width());
    flipped.set_height(image.natural_height());

    let ctx = context_2d(&flipped)?;
    ctx.translate(0.0, image.natural_height() as f64)
        .map_err(js_err)?;
    ctx.scale(1.0, -1.0).map_err(js_err)?;
    ctx.draw_image_with_html_image_element(image, 0.0, 0.0)
        .map_err(js_err)?;
    Ok(flipped)
}

/// Canvas backed by an HTML `<canvas>` element
pub struct WebCanvas {
    document: Document,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    actor: HtmlImageElement,
    obstacle: HtmlImageElement,
    obstacle_flipped: HtmlCanvasElement,
    font_size: f32,
}

impl WebCanvas {
    /// Bind to `#canvas_id` and load both sprites
    pub async fn new(
        canvas_id: &str,
        actor_src: &str,
        obstacle_src: &str,
        font_size: f32,
    ) -> Result<Self, AssetError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(AssetError::NoWindow)?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| AssetError::MissingCanvas(canvas_id.to_string()))?
            .dyn_into()
            .map_err(|_| AssetError::MissingCanvas(canvas_id.to_string()))?;
        let ctx = context_2d(&canvas)?;

        let actor = load_image(actor_src).await?;
        let obstacle = load_image(obstacle_src).await?;
        let obstacle_flipped = flip_vertically(&document, &obstacle)?;
        log::info!(
            "Loaded sprites ({}x{}, {}x{})",
            actor.natural_width(),
            actor.natural_height(),
            obstacle.natural_width(),
            obstacle.natural_height()
        );

        Ok(Self {
            document,
            canvas,
            ctx,
            actor,
            obstacle,
            obstacle_flipped,
            font_size,
        })
    }
}

impl Canvas for WebCanvas {
    fn create_window(&mut self, width: u32, height: u32, title: &str) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.document.set_title(title);
    }

    fn clear(&mut self, color: Rgb) {
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2) {
        let (x, y) = (pos.x as f64, pos.y as f64);
        let result = match sprite {
            Sprite::Actor => self.ctx.draw_image_with_html_image_element(&self.actor, x, y),
            Sprite::Obstacle => self
                .ctx
                .draw_image_with_html_image_element(&self.obstacle, x, y),
            Sprite::ObstacleFlipped => self
                .ctx
                .draw_image_with_html_canvas_element(&self.obstacle_flipped, x, y),
        };
        if let Err(e) = result {
            log::warn!("Failed to draw {:?}: {:?}", sprite, e);
        }
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, color: Rgb) {
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx.set_font(&format!("{}px sans-serif", self.font_size));
        self.ctx.set_text_baseline("top");
        if let Err(e) = self.ctx.fill_text(text, pos.x as f64, pos.y as f64) {
            log::warn!("Failed to draw text: {:?}", e);
        }
    }

    fn present(&mut self) {
        // The browser composites the canvas after the animation frame
    }
}

/// Keyboard events buffered between animation frames
#[derive(Debug, Clone, Default)]
pub struct KeyQueue {
    events: Rc<RefCell<VecDeque<InputEvent>>>,
}

impl KeyQueue {
    pub fn push(&self, event: InputEvent) {
        self.events.borrow_mut().push_back(event);
    }

    /// Map a `KeyboardEvent.key` value onto a game event
    pub fn push_key(&self, key: &str) {
        let event = match key {
            " " => InputEvent::KeyDown(Key::Space),
            "Escape" => InputEvent::Quit,
            _ => InputEvent::KeyDown(Key::Other),
        };
        self.push(event);
    }
}

impl InputSource for KeyQueue {
    fn drain(&mut self) -> Vec<InputEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
}

/// Clock reading `performance.now()`. Pacing comes from `requestAnimationFrame`.
pub struct WebClock {
    performance: Performance,
}

impl WebClock {
    pub fn new() -> Result<Self, AssetError> {
        let performance = web_sys::window()
            .and_then(|w| w.performance())
            .ok_or(AssetError::NoWindow)?;
        Ok(Self { performance })
    }
}

impl Clock for WebClock {
    fn now_ms(&self) -> f64 {
        self.performance.now()
    }

    fn limit_rate(&mut self, _target_fps: u32) {
        // Frames are scheduled by requestAnimationFrame with a fixed-step accumulator
    }
}
