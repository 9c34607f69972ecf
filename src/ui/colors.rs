//! Color utilities for UI rendering
//!
//! Converts animation colors to egui colors and provides the palette for
//! each [`Theme`].

use eframe::egui;

use crate::animation::color::Rgb;
use crate::models::{OutputKind, Theme};

/// Extension trait to convert animation colors to egui::Color32
pub trait ToEguiColor {
    /// Convert to an opaque egui::Color32
    fn to_egui(&self) -> egui::Color32;

    /// Convert to egui::Color32 with `alpha` in 0.0..=1.0
    fn to_egui_with_alpha(&self, alpha: f32) -> egui::Color32;
}

impl ToEguiColor for Rgb {
    fn to_egui(&self) -> egui::Color32 {
        egui::Color32::from_rgb(self.r, self.g, self.b)
    }

    fn to_egui_with_alpha(&self, alpha: f32) -> egui::Color32 {
        let alpha = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, alpha)
    }
}

/// Palette of the terminal for one theme
#[derive(Debug, Clone, PartialEq)]
pub struct UiColors {
    pub background: egui::Color32,
    pub foreground: egui::Color32,
    /// Prompt text in front of commands
    pub prompt: egui::Color32,
    /// Echoed command text
    pub command: egui::Color32,
    pub heading: egui::Color32,
    pub muted: egui::Color32,
    pub success: egui::Color32,
    pub error: egui::Color32,
    pub info: egui::Color32,
    pub warning: egui::Color32,
}

impl UiColors {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: egui::Color32::from_rgb(0, 0, 0),
                foreground: egui::Color32::from_rgb(220, 220, 220),
                prompt: egui::Color32::from_rgb(0, 255, 65),
                command: egui::Color32::from_rgb(255, 255, 255),
                heading: egui::Color32::from_rgb(0, 255, 65),
                muted: egui::Color32::from_rgb(130, 130, 130),
                success: egui::Color32::from_rgb(100, 255, 100),
                error: egui::Color32::from_rgb(255, 100, 100),
                info: egui::Color32::from_rgb(200, 230, 200),
                warning: egui::Color32::from_rgb(255, 200, 80),
            },
            Theme::Light => Self {
                background: egui::Color32::from_rgb(245, 245, 240),
                foreground: egui::Color32::from_rgb(30, 30, 30),
                prompt: egui::Color32::from_rgb(0, 120, 40),
                command: egui::Color32::from_rgb(0, 0, 0),
                heading: egui::Color32::from_rgb(0, 100, 30),
                muted: egui::Color32::from_rgb(110, 110, 110),
                success: egui::Color32::from_rgb(20, 130, 40),
                error: egui::Color32::from_rgb(190, 30, 30),
                info: egui::Color32::from_rgb(40, 60, 40),
                warning: egui::Color32::from_rgb(170, 100, 0),
            },
        }
    }

    /// Text color of an output
    pub fn for_output(&self, kind: OutputKind) -> egui::Color32 {
        match kind {
            OutputKind::Success => self.success,
            OutputKind::Error => self.error,
            OutputKind::Info => self.info,
            OutputKind::Warning => self.warning,
        }
    }
}

/// egui visuals matching `theme`
pub fn visuals(theme: Theme) -> egui::Visuals {
    let colors = UiColors::for_theme(theme);
    let mut visuals = match theme {
        Theme::Dark => egui::Visuals::dark(),
        Theme::Light => egui::Visuals::light(),
    };
    visuals.panel_fill = colors.background;
    visuals.window_fill = colors.background;
    visuals.extreme_bg_color = colors.background;
    visuals.override_text_color = Some(colors.foreground);
    visuals
}
