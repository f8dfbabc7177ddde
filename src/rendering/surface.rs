//! # Drawing Surface
//!
//! The write-only surface the display paints onto. Origin is the top-left
//! corner, x increases to the right, y increases downward.
//!
//! [`MacroquadSurface`] is the production implementation. [`RecordingSurface`]
//! captures draw operations instead of rasterizing them, which is how the
//! frame-content tests inspect what a paint call produced.

use macroquad::prelude::*;

use crate::rendering::{AssetCache, SpriteId};

/// Write-only pixel output for one frame.
pub trait Surface {
    /// Surface width in pixels.
    fn width(&self) -> f32;

    /// Surface height in pixels.
    fn height(&self) -> f32;

    /// Fills a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draws a sprite stretched to the given rectangle.
    fn draw_sprite(&mut self, sprite: SpriteId, rect: Rect);

    /// Draws a one-pixel circle outline centered at (x, y).
    fn draw_circle_outline(&mut self, x: f32, y: f32, radius: f32, color: Color);

    /// Draws text horizontally centered on x, baseline at y.
    fn draw_text_center(&mut self, text: &str, color: Color, x: f32, y: f32, size: f32);

    /// Draws text with its left edge at x, baseline at y.
    fn draw_text_left(&mut self, text: &str, color: Color, x: f32, y: f32, size: f32);
}

/// Surface backed by the macroquad window.
pub struct MacroquadSurface {
    assets: AssetCache,
}

impl MacroquadSurface {
    /// Wraps a loaded asset cache.
    pub fn new(assets: AssetCache) -> Self {
        Self { assets }
    }

    /// The asset cache backing this surface.
    pub fn assets(&self) -> &AssetCache {
        &self.assets
    }

    fn text_params(&self, color: Color, size: f32) -> TextParams<'_> {
        TextParams {
            font: self.assets.font(),
            font_size: size as u16,
            color,
            ..Default::default()
        }
    }
}

impl Surface for MacroquadSurface {
    fn width(&self) -> f32 {
        screen_width()
    }

    fn height(&self) -> f32 {
        screen_height()
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
    }

    fn draw_sprite(&mut self, sprite: SpriteId, rect: Rect) {
        let texture = self.assets.texture(sprite);
        draw_texture_ex(
            texture,
            rect.x,
            rect.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(rect.w, rect.h)),
                ..Default::default()
            },
        );
    }

    fn draw_circle_outline(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        draw_circle_lines(x, y, radius, 1.0, color);
    }

    fn draw_text_center(&mut self, text: &str, color: Color, x: f32, y: f32, size: f32) {
        let dims = measure_text(text, self.assets.font(), size as u16, 1.0);
        draw_text_ex(text, x - dims.width / 2.0, y, self.text_params(color, size));
    }

    fn draw_text_left(&mut self, text: &str, color: Color, x: f32, y: f32, size: f32) {
        draw_text_ex(text, x, y, self.text_params(color, size));
    }
}

/// One recorded draw operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: Color,
    },
    Sprite {
        sprite: SpriteId,
        rect: Rect,
    },
    CircleOutline {
        x: f32,
        y: f32,
        radius: f32,
        color: Color,
    },
    TextCenter {
        text: String,
        color: Color,
        x: f32,
        y: f32,
    },
    TextLeft {
        text: String,
        color: Color,
        x: f32,
        y: f32,
    },
}

/// Headless surface that records every operation in order.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    /// Creates a recording surface of the given logical size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// All sprite operations recorded so far.
    pub fn sprites(&self) -> Vec<(SpriteId, Rect)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Sprite { sprite, rect } => Some((*sprite, *rect)),
                _ => None,
            })
            .collect()
    }

    /// All text strings recorded so far, centered and left-aligned alike.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::TextCenter { text, .. } | DrawOp::TextLeft { text, .. } => {
                    Some(text.as_str())
                }
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn draw_sprite(&mut self, sprite: SpriteId, rect: Rect) {
        self.ops.push(DrawOp::Sprite { sprite, rect });
    }

    fn draw_circle_outline(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        self.ops.push(DrawOp::CircleOutline {
            x,
            y,
            radius,
            color,
        });
    }

    fn draw_text_center(&mut self, text: &str, color: Color, x: f32, y: f32, _size: f32) {
        self.ops.push(DrawOp::TextCenter {
            text: text.to_string(),
            color,
            x,
            y,
        });
    }

    fn draw_text_left(&mut self, text: &str, color: Color, x: f32, y: f32, _size: f32) {
        self.ops.push(DrawOp::TextLeft {
            text: text.to_string(),
            color,
            x,
            y,
        });
    }
}
