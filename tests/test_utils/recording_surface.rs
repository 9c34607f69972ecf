//! Surface that records draw calls instead of compositing them

use matrixterm::animation::color::Rgb;
use matrixterm::animation::{GlyphStyle, Surface};

/// One `draw_glyph` call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnGlyph {
    pub glyph: char,
    pub x: f32,
    pub y: f32,
    pub color: Rgb,
    pub alpha: f32,
    pub font_size_px: f32,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    /// Alpha of every `fade` call, in order
    pub fades: Vec<f32>,
    pub glyphs: Vec<DrawnGlyph>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Forget everything recorded so far
    pub fn reset(&mut self) {
        self.fades.clear();
        self.glyphs.clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn fade(&mut self, alpha: f32) {
        self.fades.push(alpha);
    }

    fn draw_glyph(&mut self, glyph: char, x: f32, y: f32, style: &GlyphStyle) {
        self.glyphs.push(DrawnGlyph {
            glyph,
            x,
            y,
            color: style.color,
            alpha: style.alpha,
            font_size_px: style.font_size_px,
        });
    }
}
