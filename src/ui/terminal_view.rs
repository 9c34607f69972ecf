//! History and prompt rendering

use eframe::egui;

use crate::models::{HistoryEntry, Output, SessionState};
use crate::terminal::TerminalSession;
use crate::ui::colors::UiColors;
use crate::ui::markup::{self, MarkupLine, Span};

/// Fonts and colors shared by everything drawn in the terminal
#[derive(Debug, Clone, Copy)]
pub struct TextStyle<'a> {
    pub colors: &'a UiColors,
    pub font_size: f32,
}

impl TextStyle<'_> {
    fn mono(&self, text: &str) -> egui::RichText {
        egui::RichText::new(text).font(egui::FontId::monospace(self.font_size))
    }
}

/// Render the visible history, scrolled to the newest entry
pub fn show_history(
    ui: &mut egui::Ui,
    session: &TerminalSession,
    state: &SessionState,
    prompt: &str,
    style: TextStyle<'_>,
) {
    egui::ScrollArea::vertical()
        .stick_to_bottom(true)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for entry in &state.history {
                show_entry(ui, session, entry, prompt, style);
                ui.add_space(style.font_size * 0.5);
            }
        });
}

fn show_entry(
    ui: &mut egui::Ui,
    session: &TerminalSession,
    entry: &HistoryEntry,
    prompt: &str,
    style: TextStyle<'_>,
) {
    if !entry.is_system() {
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            ui.label(style.mono(prompt).color(style.colors.prompt));
            ui.label(style.mono(&entry.command).color(style.colors.command));
        });
    }

    match &entry.output {
        Some(output) => {
            let visible = session.reveals().visible(entry.id, &output.content);
            show_output(ui, output, visible, style);
        }
        None => {
            ui.label(style.mono("...").color(style.colors.muted));
        }
    }
}

fn show_output(ui: &mut egui::Ui, output: &Output, visible: &str, style: TextStyle<'_>) {
    if visible.is_empty() {
        return;
    }
    let color = style.colors.for_output(output.kind);

    if !output.is_markup {
        ui.label(style.mono(visible).color(color));
        return;
    }

    for line in markup::parse(visible) {
        match line {
            MarkupLine::Heading(spans) => {
                let heading = TextStyle {
                    font_size: style.font_size * 1.3,
                    ..style
                };
                show_spans(ui, &spans, style.colors.heading, true, heading);
            }
            MarkupLine::Bullet(spans) => {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing.x = 0.0;
                    ui.label(style.mono("  • ").color(style.colors.prompt));
                    show_inline(ui, &spans, color, false, style);
                });
            }
            MarkupLine::Text(spans) => show_spans(ui, &spans, color, false, style),
            MarkupLine::Blank => {
                ui.add_space(style.font_size * 0.5);
            }
        }
    }
}

fn show_spans(
    ui: &mut egui::Ui,
    spans: &[Span<'_>],
    color: egui::Color32,
    all_strong: bool,
    style: TextStyle<'_>,
) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        show_inline(ui, spans, color, all_strong, style);
    });
}

fn show_inline(
    ui: &mut egui::Ui,
    spans: &[Span<'_>],
    color: egui::Color32,
    all_strong: bool,
    style: TextStyle<'_>,
) {
    for span in spans {
        let text = style.mono(span.text);
        if span.strong || all_strong {
            ui.label(text.color(style.colors.heading).strong());
        } else {
            ui.label(text.color(color));
        }
    }
}

/// Render the prompt line bound to the session's current input.
///
/// Returns the response of the text field. When `cursor_to_end` is set the
/// caret is moved after the last character (after recall or completion).
pub fn show_prompt(
    ui: &mut egui::Ui,
    session: &TerminalSession,
    state: &SessionState,
    prompt: &str,
    cursor_to_end: bool,
    style: TextStyle<'_>,
) -> egui::Response {
    let mut input = state.current_input.clone();

    let response = ui
        .horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            ui.label(style.mono(prompt).color(style.colors.prompt));
            ui.add(
                egui::TextEdit::singleline(&mut input)
                    .font(egui::FontId::monospace(style.font_size))
                    .text_color(style.colors.command)
                    .desired_width(f32::INFINITY)
                    .frame(egui::Frame::NONE)
                    .interactive(!state.is_processing)
                    .lock_focus(true),
            )
        })
        .inner;

    if input != state.current_input {
        session.set_input(&input);
    }

    if cursor_to_end {
        if let Some(mut text_state) = egui::TextEdit::load_state(ui.ctx(), response.id) {
            let end = egui::text::CCursor::new(input.chars().count());
            text_state
                .cursor
                .set_char_range(Some(egui::text::CCursorRange::one(end)));
            text_state.store(ui.ctx(), response.id);
        }
    }

    response.request_focus();
    response
}

/// Render completion candidates below the prompt
pub fn show_candidates(ui: &mut egui::Ui, candidates: &[String], style: TextStyle<'_>) {
    if candidates.len() < 2 {
        return;
    }
    ui.label(style.mono(&candidates.join("  ")).color(style.colors.muted));
}
