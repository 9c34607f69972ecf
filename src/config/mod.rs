//! Configuration management for MatrixTerm
//!
//! Every section and field has a default, so a config file only needs to
//! contain what it changes. The `[profile]` section feeds the informational
//! commands (`about`, `skills`, `projects`, ...).

pub mod loader;

use serde::{Deserialize, Serialize};

use crate::animation::config::{
    AnimationConfig, DEFAULT_COLOR, DEFAULT_FONT_SIZE, DEFAULT_OPACITY, DEFAULT_SPEED,
    DEFAULT_TRAIL_OPACITY, FONT_SIZE_RANGE, OPACITY_RANGE, SPEED_RANGE, TRAIL_OPACITY_RANGE,
};
use crate::animation::frame_loop::DEFAULT_FRAMES_PER_SECOND;
use crate::error::{Error, Result};
use crate::models::Theme;

pub use loader::{ConfigFormat, ConfigLoader, CONFIG_ENV_VAR};

/// Main configuration structure for MatrixTerm
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prompt and session behaviour
    pub terminal: TerminalConfig,

    /// Initial animation parameters
    pub animation: AnimationSettings,

    /// Window configuration
    pub ui: UiConfig,

    /// Content of the informational commands
    pub profile: ProfileConfig,
}

impl Config {
    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.terminal.prompt.trim().is_empty() {
            return Err(invalid("terminal.prompt", "Prompt cannot be empty"));
        }

        if self.terminal.typing_delay_ms > 1000 {
            return Err(invalid(
                "terminal.typing_delay_ms",
                "Typing delay cannot exceed 1000 ms",
            ));
        }

        let animation = &self.animation;
        check_range("animation.speed", animation.speed, SPEED_RANGE)?;
        check_range("animation.opacity", animation.opacity, OPACITY_RANGE)?;
        check_range("animation.font_size_px", animation.font_size_px, FONT_SIZE_RANGE)?;
        check_range(
            "animation.trail_opacity",
            animation.trail_opacity,
            TRAIL_OPACITY_RANGE,
        )?;

        if animation.character_set.is_empty() {
            return Err(invalid(
                "animation.character_set",
                "Character set cannot be empty",
            ));
        }

        if !(1..=240).contains(&animation.frames_per_second) {
            return Err(invalid(
                "animation.frames_per_second",
                "Frame rate must be between 1 and 240",
            ));
        }

        if !(6.0..=72.0).contains(&self.ui.font_size) {
            return Err(invalid("ui.font_size", "Font size must be between 6 and 72"));
        }

        if self.ui.window_width < 200.0 || self.ui.window_height < 150.0 {
            return Err(invalid("ui.window_size", "Window must be at least 200x150"));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> Error {
    Error::ConfigValidationFailed {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn check_range(field: &str, value: f64, (min, max): (f64, f64)) -> Result<()> {
    if value.is_nan() || value < min || value > max {
        return Err(Error::ConfigValidationFailed {
            field: field.to_string(),
            reason: format!("{} is outside the allowed range {}-{}", value, min, max),
        });
    }
    Ok(())
}

/// Terminal-specific configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Prompt shown before the input line
    pub prompt: String,

    /// Theme at startup
    pub default_theme: Theme,

    /// Markup shown as the first history entry
    pub welcome_message: String,

    /// Per-step reveal delay for long-form output (milliseconds)
    pub typing_delay_ms: u64,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            prompt: "guest@portfolio:~$ ".to_string(),
            default_theme: Theme::Dark,
            welcome_message: [
                "# Welcome to the portfolio terminal",
                "",
                "Type **help** to see the available commands.",
                "Use **Tab** to complete a command and **Up**/**Down** to browse your history.",
            ]
            .join("\n"),
            typing_delay_ms: 8,
        }
    }
}

/// Initial animation parameters.
///
/// `character_set` may be a preset name (`matrix`, `binary`, ...) or the
/// literal glyphs to use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub paused: bool,
    pub speed: f64,
    pub opacity: f64,
    pub color: String,
    pub character_set: String,
    pub font_size_px: f64,
    pub trail_opacity: f64,
    pub frames_per_second: u32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            paused: false,
            speed: DEFAULT_SPEED,
            opacity: DEFAULT_OPACITY,
            color: DEFAULT_COLOR.to_string(),
            character_set: "matrix".to_string(),
            font_size_px: DEFAULT_FONT_SIZE,
            trail_opacity: DEFAULT_TRAIL_OPACITY,
            frames_per_second: DEFAULT_FRAMES_PER_SECOND,
        }
    }
}

impl AnimationSettings {
    /// Build the engine configuration, clamping as the engine would
    pub fn to_animation_config(&self) -> AnimationConfig {
        let mut config = AnimationConfig::default();
        config.set_paused(self.paused);
        config.set_speed(self.speed);
        config.set_opacity(self.opacity);
        config.set_color(&self.color);
        config.set_character_set(&self.character_set);
        config.set_font_size(self.font_size_px);
        config.set_trail_opacity(self.trail_opacity);
        config
    }
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Font size of the terminal text in points
    pub font_size: f32,

    pub window_width: f32,
    pub window_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            window_width: 1100.0,
            window_height: 720.0,
        }
    }
}

/// A labelled line of profile content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileItem {
    pub label: String,
    #[serde(default)]
    pub detail: String,
}

impl ProfileItem {
    pub fn new(label: &str, detail: &str) -> Self {
        Self {
            label: label.to_string(),
            detail: detail.to_string(),
        }
    }
}

/// One position in the `experience` listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// Content shown by the informational commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub name: String,
    pub title: String,
    pub location: String,
    pub about: String,
    /// Skill groups: label is the category, detail the comma-separated skills
    pub skills: Vec<ProfileItem>,
    pub projects: Vec<ProfileItem>,
    pub experience: Vec<Position>,
    pub education: Vec<String>,
    pub contact: Vec<ProfileItem>,
    pub resume_url: String,
    pub languages: Vec<ProfileItem>,
    pub programming_languages: Vec<ProfileItem>,
    pub interests: Vec<ProfileItem>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "Alex Morgan".to_string(),
            title: "Software Engineer | Systems & Tooling".to_string(),
            location: "Remote".to_string(),
            about: "Engineer who enjoys building fast, reliable tools: terminals, \
                    parsers and the occasional rendering engine. Happiest where \
                    careful design meets a good user experience."
                .to_string(),
            skills: vec![
                ProfileItem::new("Languages", "Rust, TypeScript, Python, SQL"),
                ProfileItem::new("Systems", "async runtimes, networking, storage engines"),
                ProfileItem::new("Frontend", "egui, Vue, React, Tailwind CSS"),
                ProfileItem::new("Tooling", "Git, CI/CD, Docker, Linux"),
            ],
            projects: vec![
                ProfileItem::new("matrixterm", "This terminal, with a digital rain background"),
                ProfileItem::new("logtail", "Structured log viewer with live filtering"),
                ProfileItem::new("kvlite", "Embedded key-value store with a write-ahead log"),
            ],
            experience: vec![
                Position {
                    role: "Senior Software Engineer".to_string(),
                    company: "Example Systems".to_string(),
                    location: "Remote".to_string(),
                    period: "2022 - Present".to_string(),
                    highlights: vec![
                        "Built internal developer tooling in Rust".to_string(),
                        "Led the migration of a service fleet to async I/O".to_string(),
                    ],
                },
                Position {
                    role: "Software Engineer".to_string(),
                    company: "Sample Labs".to_string(),
                    location: "Berlin".to_string(),
                    period: "2018 - 2022".to_string(),
                    highlights: vec!["Shipped web frontends and their APIs".to_string()],
                },
            ],
            education: vec!["B.Sc. Computer Science".to_string()],
            contact: vec![
                ProfileItem::new("Email", "alex@example.com"),
                ProfileItem::new("GitHub", "github.com/example"),
                ProfileItem::new("Website", "example.com"),
            ],
            resume_url: "https://example.com/resume.pdf".to_string(),
            languages: vec![
                ProfileItem::new("English", "Fluent"),
                ProfileItem::new("German", "Intermediate"),
            ],
            programming_languages: vec![
                ProfileItem::new("Rust", "Advanced"),
                ProfileItem::new("TypeScript", "Advanced"),
                ProfileItem::new("Python", "Intermediate"),
                ProfileItem::new("SQL", "Intermediate"),
            ],
            interests: vec![
                ProfileItem::new("Cycling", "Long rides for focus and stamina"),
                ProfileItem::new("Hiking", "Trails, photography and fresh air"),
            ],
        }
    }
}
