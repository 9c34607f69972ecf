//! CSS color parsing for the rain glyphs
//!
//! The animation stores its color as the string the user typed (so
//! `matrix status` echoes it back unchanged); drawing needs actual channel
//! values, which this module extracts.

use crate::animation::config::COLOR_PRESETS;

/// An opaque 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Basic CSS named colors understood besides the animation presets
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("black", Rgb::new(0, 0, 0)),
    ("silver", Rgb::new(192, 192, 192)),
    ("gray", Rgb::new(128, 128, 128)),
    ("grey", Rgb::new(128, 128, 128)),
    ("maroon", Rgb::new(128, 0, 0)),
    ("green", Rgb::new(0, 128, 0)),
    ("lime", Rgb::new(0, 255, 0)),
    ("olive", Rgb::new(128, 128, 0)),
    ("navy", Rgb::new(0, 0, 128)),
    ("teal", Rgb::new(0, 128, 128)),
    ("aqua", Rgb::new(0, 255, 255)),
    ("magenta", Rgb::new(255, 0, 255)),
    ("fuchsia", Rgb::new(255, 0, 255)),
    ("gold", Rgb::new(255, 215, 0)),
];

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a CSS color: `#rgb`, `#rrggbb`, `#rrggbbaa` (alpha ignored),
    /// `rgb(r, g, b)`, or a known color name.
    pub fn parse(css: &str) -> Option<Self> {
        let css = css.trim();
        if let Some(hex) = css.strip_prefix('#') {
            return Self::from_hex(hex);
        }

        let lower = css.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgb(")
            .or_else(|| lower.strip_prefix("rgba("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Self::from_rgb_function(args);
        }

        if let Some((_, hex)) = COLOR_PRESETS.iter().find(|(name, _)| *name == lower) {
            return Self::parse(hex);
        }
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, rgb)| *rgb)
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Some(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            6 | 8 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => None,
        }
    }

    fn from_rgb_function(args: &str) -> Option<Self> {
        let mut parts = args.split(',').map(|part| part.trim().parse::<u8>().ok());
        let r = parts.next()??;
        let g = parts.next()??;
        let b = parts.next()??;
        Some(Self::new(r, g, b))
    }
}
