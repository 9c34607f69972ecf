//! Digital rain engine
//!
//! Owns one [`RainDrop`] per glyph column and advances them once per frame.
//! Each frame first fades what is already on the surface, then draws one
//! random glyph per column at the drop's position and moves the drop down.
//! Drops that have fallen past the bottom edge restart at the top with a
//! small probability per frame, which keeps the columns out of step with
//! each other.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::animation::bus::AnimationControl;
use crate::animation::color::Rgb;
use crate::animation::config::{AnimationConfig, DEFAULT_COLOR};
use crate::animation::surface::{GlyphStyle, Surface};

/// Chance per frame that a drop below the bottom edge restarts at the top
pub const DROP_RESET_PROBABILITY: f64 = 0.025;

/// New drops start up to this many rows above the visible area
pub const DROP_START_SPREAD_ROWS: f64 = 100.0;

/// Per-column falling cursor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainDrop {
    /// Vertical position in rows (multiply by the font size for pixels)
    pub position_rows: f64,
}

/// The rain renderer
#[derive(Debug)]
pub struct MatrixEngine {
    config: AnimationConfig,
    /// Parsed form of `config.color`
    color: Rgb,
    /// Characters of `config.character_set`
    glyphs: Vec<char>,
    drops: Vec<RainDrop>,
    size: (f32, f32),
    rng: StdRng,
    frames_drawn: u64,
}

impl MatrixEngine {
    /// Create an engine for a surface of `width` x `height` pixels
    pub fn new(config: AnimationConfig, width: f32, height: f32) -> Self {
        Self::with_rng(config, width, height, StdRng::from_entropy())
    }

    /// Create an engine with a deterministic random sequence
    pub fn with_seed(config: AnimationConfig, width: f32, height: f32, seed: u64) -> Self {
        Self::with_rng(config, width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: AnimationConfig, width: f32, height: f32, rng: StdRng) -> Self {
        let mut engine = Self {
            color: Rgb::parse(config.color())
                .or_else(|| Rgb::parse(DEFAULT_COLOR))
                .unwrap_or(Rgb::new(0, 255, 65)),
            glyphs: config.character_set().chars().collect(),
            config,
            drops: Vec::new(),
            size: (width, height),
            rng,
            frames_drawn: 0,
        };
        engine.reset_drops();
        engine
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn drops(&self) -> &[RainDrop] {
        &self.drops
    }

    /// Number of glyph columns across the surface
    pub fn columns(&self) -> usize {
        self.drops.len()
    }

    pub fn size(&self) -> (f32, f32) {
        self.size
    }

    /// Frames actually drawn (paused frames are not counted)
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Adopt a new surface size. Drops are reallocated from scratch.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = (width, height);
        self.reset_drops();
    }

    fn column_count(&self) -> usize {
        let width = f64::from(self.size.0);
        if width <= 0.0 {
            return 0;
        }
        (width / self.config.font_size_px()).floor() as usize
    }

    fn reset_drops(&mut self) {
        let columns = self.column_count();
        let rng = &mut self.rng;
        self.drops = (0..columns)
            .map(|_| RainDrop {
                position_rows: -rng.gen_range(0.0..DROP_START_SPREAD_ROWS),
            })
            .collect();
        debug!(columns, size = ?self.size, "Rain drops reallocated");
    }

    /// Draw one frame. Returns `false` when paused (nothing drawn or moved).
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if self.config.paused() {
            return false;
        }

        let size = surface.size();
        if size != self.size {
            self.resize(size.0, size.1);
        }

        surface.fade(self.config.trail_opacity() as f32);

        let font = self.config.font_size_px();
        let style = GlyphStyle {
            color: self.color,
            alpha: self.config.opacity() as f32,
            font_size_px: font as f32,
        };
        let height = f64::from(self.size.1);
        let speed = self.config.speed();

        for (column, drop) in self.drops.iter_mut().enumerate() {
            if let Some(&glyph) = self.glyphs.choose(&mut self.rng) {
                surface.draw_glyph(
                    glyph,
                    (column as f64 * font) as f32,
                    (drop.position_rows * font) as f32,
                    &style,
                );
            }

            if drop.position_rows * font > height && self.rng.gen_bool(DROP_RESET_PROBABILITY) {
                drop.position_rows = 0.0;
            }

            drop.position_rows += speed;
        }

        self.frames_drawn += 1;
        true
    }

    pub fn pause(&mut self) {
        self.config.set_paused(true);
    }

    pub fn resume(&mut self) {
        self.config.set_paused(false);
    }

    pub fn set_speed(&mut self, speed: f64) -> f64 {
        self.config.set_speed(speed)
    }

    pub fn set_opacity(&mut self, opacity: f64) -> f64 {
        self.config.set_opacity(opacity)
    }

    /// Set the glyph color. Unparseable colors are stored but drawing keeps
    /// the previous channel values.
    pub fn set_color(&mut self, color: &str) {
        self.config.set_color(color);
        match Rgb::parse(self.config.color()) {
            Some(rgb) => self.color = rgb,
            None => warn!("Unrecognized color '{}', keeping previous glyph color", color),
        }
    }

    pub fn set_character_set(&mut self, name_or_glyphs: &str) {
        self.config.set_character_set(name_or_glyphs);
        self.glyphs = self.config.character_set().chars().collect();
    }

    /// Set the glyph size. A changed size reallocates the drops.
    pub fn set_font_size(&mut self, font_size_px: f64) -> f64 {
        let previous = self.config.font_size_px();
        let stored = self.config.set_font_size(font_size_px);
        if stored != previous {
            self.reset_drops();
        }
        stored
    }

    pub fn set_trail_opacity(&mut self, trail_opacity: f64) -> f64 {
        self.config.set_trail_opacity(trail_opacity)
    }

    /// Apply a whole configuration through the individual setters
    pub fn apply(&mut self, config: &AnimationConfig) {
        if config.paused() {
            self.pause();
        } else {
            self.resume();
        }
        self.set_speed(config.speed());
        self.set_opacity(config.opacity());
        self.set_color(config.color());
        self.set_character_set(config.character_set());
        self.set_font_size(config.font_size_px());
        self.set_trail_opacity(config.trail_opacity());
    }
}

/// Engine shared between its frame loop and the control bus.
///
/// Frames and setters take the same lock, so a configuration change always
/// lands between two frames.
#[derive(Debug, Clone)]
pub struct SharedEngine(Arc<Mutex<MatrixEngine>>);

impl SharedEngine {
    pub fn new(engine: MatrixEngine) -> Self {
        Self(Arc::new(Mutex::new(engine)))
    }

    pub fn lock(&self) -> MutexGuard<'_, MatrixEngine> {
        self.0.lock()
    }

    /// Draw one frame on `surface`
    pub fn frame<S: Surface + ?Sized>(&self, surface: &mut S) -> bool {
        self.0.lock().frame(surface)
    }
}

impl AnimationControl for SharedEngine {
    fn pause(&self) {
        self.lock().pause();
    }

    fn resume(&self) {
        self.lock().resume();
    }

    fn set_speed(&self, speed: f64) {
        self.lock().set_speed(speed);
    }

    fn set_opacity(&self, opacity: f64) {
        self.lock().set_opacity(opacity);
    }

    fn set_color(&self, color: &str) {
        self.lock().set_color(color);
    }

    fn set_character_set(&self, name_or_glyphs: &str) {
        self.lock().set_character_set(name_or_glyphs);
    }

    fn set_font_size(&self, font_size_px: f64) {
        self.lock().set_font_size(font_size_px);
    }

    fn set_trail_opacity(&self, trail_opacity: f64) {
        self.lock().set_trail_opacity(trail_opacity);
    }

    fn apply(&self, config: &AnimationConfig) {
        self.lock().apply(config);
    }

    fn current_state(&self) -> AnimationConfig {
        self.lock().config().clone()
    }
}
