//! Animation parameters
//!
//! [`AnimationConfig`] is the full set of knobs the rain effect exposes. All
//! numeric setters clamp into their allowed range instead of rejecting the
//! value, so direct API callers can never push the renderer into a bad state.

use serde::{Deserialize, Serialize};

/// Allowed range for the fall speed (rows per frame)
pub const SPEED_RANGE: (f64, f64) = (0.1, 10.0);
/// Allowed range for glyph opacity
pub const OPACITY_RANGE: (f64, f64) = (0.1, 1.0);
/// Allowed range for the glyph size in pixels
pub const FONT_SIZE_RANGE: (f64, f64) = (8.0, 32.0);
/// Allowed range for the per-frame fade applied to previous frames
pub const TRAIL_OPACITY_RANGE: (f64, f64) = (0.01, 0.2);

pub const DEFAULT_SPEED: f64 = 1.0;
pub const DEFAULT_OPACITY: f64 = 0.3;
pub const DEFAULT_COLOR: &str = "#00ff41";
pub const DEFAULT_FONT_SIZE: f64 = 14.0;
pub const DEFAULT_TRAIL_OPACITY: f64 = 0.04;

/// Name reported for a character set that matches no preset
pub const CUSTOM_CHARACTER_SET: &str = "custom";

/// Built-in character sets, by name
pub const CHARACTER_SETS: &[(&str, &str)] = &[
    (
        "matrix",
        "アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    ),
    ("binary", "01"),
    ("hex", "0123456789ABCDEF"),
    ("symbols", "!@#$%^&*()_+-=[]{}|;:,.<>?"),
    ("letters", "ABCDEFGHIJKLMNOPQRSTUVWXYZ"),
    ("numbers", "0123456789"),
    (
        "katakana",
        "アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン",
    ),
    (
        "hiragana",
        "あいうえおかきくけこさしすせそたちつてとなにぬねのはひふへほまみむめもやゆよらりるれろわをん",
    ),
];

/// Built-in color presets, by name
pub const COLOR_PRESETS: &[(&str, &str)] = &[
    ("matrix", "#00ff41"),
    ("red", "#ff0000"),
    ("blue", "#0080ff"),
    ("purple", "#8000ff"),
    ("cyan", "#00ffff"),
    ("yellow", "#ffff00"),
    ("orange", "#ff8000"),
    ("pink", "#ff0080"),
    ("white", "#ffffff"),
];

/// Glyphs of a named character set
pub fn character_set_by_name(name: &str) -> Option<&'static str> {
    CHARACTER_SETS
        .iter()
        .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
        .map(|(_, glyphs)| *glyphs)
}

/// Clamp `value` into `range`. NaN yields `None` so callers can keep the old value.
pub fn clamp_to(value: f64, range: (f64, f64)) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value.clamp(range.0, range.1))
    }
}

/// Visual parameters of the rain animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    paused: bool,
    speed: f64,
    opacity: f64,
    color: String,
    character_set: String,
    font_size_px: f64,
    trail_opacity: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            paused: false,
            speed: DEFAULT_SPEED,
            opacity: DEFAULT_OPACITY,
            color: DEFAULT_COLOR.to_string(),
            character_set: CHARACTER_SETS[0].1.to_string(),
            font_size_px: DEFAULT_FONT_SIZE,
            trail_opacity: DEFAULT_TRAIL_OPACITY,
        }
    }
}

impl AnimationConfig {
    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// The glyphs drops are drawn from
    pub fn character_set(&self) -> &str {
        &self.character_set
    }

    pub fn font_size_px(&self) -> f64 {
        self.font_size_px
    }

    pub fn trail_opacity(&self) -> f64 {
        self.trail_opacity
    }

    /// Preset name of the current character set, or `"custom"`
    pub fn character_set_name(&self) -> &'static str {
        CHARACTER_SETS
            .iter()
            .find(|(_, glyphs)| *glyphs == self.character_set)
            .map(|(name, _)| *name)
            .unwrap_or(CUSTOM_CHARACTER_SET)
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Set the fall speed, returning the stored (clamped) value
    pub fn set_speed(&mut self, speed: f64) -> f64 {
        if let Some(speed) = clamp_to(speed, SPEED_RANGE) {
            self.speed = speed;
        }
        self.speed
    }

    /// Set glyph opacity, returning the stored (clamped) value
    pub fn set_opacity(&mut self, opacity: f64) -> f64 {
        if let Some(opacity) = clamp_to(opacity, OPACITY_RANGE) {
            self.opacity = opacity;
        }
        self.opacity
    }

    /// Set the glyph color (any CSS color string)
    pub fn set_color(&mut self, color: &str) {
        let color = color.trim();
        if !color.is_empty() {
            self.color = color.to_string();
        }
    }

    /// Select a preset by name, or use `name_or_glyphs` literally.
    ///
    /// An empty string leaves the current set in place.
    pub fn set_character_set(&mut self, name_or_glyphs: &str) {
        if name_or_glyphs.is_empty() {
            return;
        }
        self.character_set = character_set_by_name(name_or_glyphs)
            .unwrap_or(name_or_glyphs)
            .to_string();
    }

    /// Set the glyph size, returning the stored (clamped) value
    pub fn set_font_size(&mut self, font_size_px: f64) -> f64 {
        if let Some(size) = clamp_to(font_size_px, FONT_SIZE_RANGE) {
            self.font_size_px = size;
        }
        self.font_size_px
    }

    /// Set the per-frame fade, returning the stored (clamped) value
    pub fn set_trail_opacity(&mut self, trail_opacity: f64) -> f64 {
        if let Some(trail) = clamp_to(trail_opacity, TRAIL_OPACITY_RANGE) {
            self.trail_opacity = trail;
        }
        self.trail_opacity
    }

    /// Copy every field of `other` through the clamping setters
    pub fn apply(&mut self, other: &AnimationConfig) {
        self.set_paused(other.paused);
        self.set_speed(other.speed);
        self.set_opacity(other.opacity);
        self.set_color(&other.color);
        self.set_character_set(&other.character_set);
        self.set_font_size(other.font_size_px);
        self.set_trail_opacity(other.trail_opacity);
    }

    /// Multi-line status report, as shown by `matrix status`
    pub fn status_report(&self) -> String {
        format!(
            "Matrix animation status:\n  Paused: {}\n  Speed: {}\n  Opacity: {}\n  Color: {}\n  Character Set: {}\n  Font Size: {}\n  Trail Opacity: {}",
            if self.paused { "Yes" } else { "No" },
            self.speed,
            self.opacity,
            self.color,
            self.character_set_name(),
            self.font_size_px,
            self.trail_opacity,
        )
    }
}
