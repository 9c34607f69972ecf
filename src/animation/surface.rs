//! Drawing surfaces for the rain animation
//!
//! The engine only needs three operations from whatever it draws on: its
//! size, a translucent black fill over everything (which fades earlier frames
//! instead of clearing them), and drawing a single glyph.
//!
//! [`GlyphGrid`] is the retained implementation used by the UI. Immediate-mode
//! painters redraw from scratch every frame, so the grid keeps what a canvas
//! would have kept: every glyph still visible, with its faded alpha.

use std::collections::HashMap;

use crate::animation::color::Rgb;

/// Glyphs fainter than this are dropped from a [`GlyphGrid`]
pub const MIN_VISIBLE_ALPHA: f32 = 0.01;

/// How a glyph is painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphStyle {
    pub color: Rgb,
    pub alpha: f32,
    pub font_size_px: f32,
}

/// Something the animation engine can draw on
pub trait Surface {
    /// Width and height in pixels
    fn size(&self) -> (f32, f32);

    /// Composite black at `alpha` over the whole surface
    fn fade(&mut self, alpha: f32);

    /// Draw `glyph` with its baseline-left corner at (`x`, `y`)
    fn draw_glyph(&mut self, glyph: char, x: f32, y: f32, style: &GlyphStyle);
}

/// A glyph left on a [`GlyphGrid`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphCell {
    pub glyph: char,
    pub x: f32,
    pub y: f32,
    pub color: Rgb,
    pub alpha: f32,
    pub font_size_px: f32,
}

/// Retained glyph surface emulating canvas compositing
#[derive(Debug, Clone, Default)]
pub struct GlyphGrid {
    width: f32,
    height: f32,
    cells: HashMap<(i32, i32), GlyphCell>,
}

impl GlyphGrid {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            cells: HashMap::new(),
        }
    }

    /// Change the surface size. Like a canvas, resizing wipes its content.
    pub fn resize(&mut self, width: f32, height: f32) {
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.cells.clear();
        }
    }

    /// Glyphs currently visible, in no particular order
    pub fn cells(&self) -> impl Iterator<Item = &GlyphCell> {
        self.cells.values()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

impl Surface for GlyphGrid {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn fade(&mut self, alpha: f32) {
        let keep = (1.0 - alpha).clamp(0.0, 1.0);
        self.cells.retain(|_, cell| {
            cell.alpha *= keep;
            cell.alpha >= MIN_VISIBLE_ALPHA
        });
    }

    fn draw_glyph(&mut self, glyph: char, x: f32, y: f32, style: &GlyphStyle) {
        // Glyphs outside the surface are clipped, as on a canvas.
        if y < 0.0 || y - style.font_size_px > self.height || x >= self.width {
            return;
        }

        let key = (x.round() as i32, y.round() as i32);
        let under = self.cells.get(&key).map_or(0.0, |cell| cell.alpha);
        self.cells.insert(
            key,
            GlyphCell {
                glyph,
                x,
                y,
                color: style.color,
                alpha: style.alpha + under * (1.0 - style.alpha),
                font_size_px: style.font_size_px,
            },
        );
    }
}
