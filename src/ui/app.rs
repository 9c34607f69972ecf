//! Main application window
//!
//! [`MatrixTermApp`] wires the headless core to egui: the rain is painted as
//! the panel background and the terminal is drawn over it. Commands, reveals
//! and the animation frame loop run on a Tokio runtime owned by the app; the
//! UI thread only reads snapshots and forwards key presses.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::animation::{ControlBus, FrameLoop, GlyphGrid, MatrixEngine, SharedEngine};
use crate::config::Config;
use crate::error::Result;
use crate::models::Theme;
use crate::terminal::{KeyAction, KeyOutcome, Shortcut, TerminalSession};
use crate::ui::colors::{self, UiColors};
use crate::ui::matrix_view;
use crate::ui::terminal_view::{self, TextStyle};

/// Name of the session file written on exit
pub const LAST_SESSION_FILE: &str = "last-session.json";

/// How often to repaint while output is still being revealed
const REVEAL_REPAINT_INTERVAL: Duration = Duration::from_millis(16);

/// The MatrixTerm window
pub struct MatrixTermApp {
    config: Config,
    session: Arc<TerminalSession>,
    bus: Arc<ControlBus>,
    surface: Arc<Mutex<GlyphGrid>>,
    frame_loop: FrameLoop,
    /// Theme the egui visuals were last set up for
    applied_theme: Option<Theme>,
    /// Candidates of the last ambiguous completion
    candidates: Vec<String>,
    /// One-line notice under the prompt (exports, errors)
    notice: Option<String>,
    cursor_to_end: bool,
    /// Declared last so every task above is stopped before it shuts down
    runtime: tokio::runtime::Runtime,
}

impl MatrixTermApp {
    /// Create the application and start the animation
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("matrixterm-worker")
            .enable_all()
            .build()?;

        let bus = Arc::new(ControlBus::new(config.animation.to_animation_config()));
        let session = Arc::new(TerminalSession::from_config(&config, bus.clone()));

        let (width, height) = (config.ui.window_width, config.ui.window_height);
        let surface = Arc::new(Mutex::new(GlyphGrid::new(width, height)));
        let engine = SharedEngine::new(MatrixEngine::new(bus.current_state(), width, height));

        let frame_loop = {
            let _guard = runtime.enter();
            let ctx = cc.egui_ctx.clone();
            FrameLoop::start(
                engine,
                surface.clone(),
                bus.clone(),
                config.animation.frames_per_second,
                move || ctx.request_repaint(),
            )
        };

        info!("MatrixTerm application initialized");
        Ok(Self {
            config,
            session,
            bus,
            surface,
            frame_loop,
            applied_theme: None,
            candidates: Vec::new(),
            notice: None,
            cursor_to_end: false,
            runtime,
        })
    }

    pub fn session(&self) -> &Arc<TerminalSession> {
        &self.session
    }

    pub fn bus(&self) -> &Arc<ControlBus> {
        &self.bus
    }

    /// Translate this frame's key presses into session actions
    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        let ctrl_shift = egui::Modifiers::CTRL | egui::Modifiers::SHIFT;
        let (shortcuts, actions) = ctx.input_mut(|input| {
            let mut shortcuts = Vec::new();
            if input.consume_key(ctrl_shift, egui::Key::T) {
                shortcuts.push(Shortcut::ToggleTheme);
            }
            if input.consume_key(ctrl_shift, egui::Key::E) {
                shortcuts.push(Shortcut::ExportSession);
            }

            let bindings = [
                (egui::Modifiers::NONE, egui::Key::Enter, KeyAction::Submit),
                (egui::Modifiers::NONE, egui::Key::ArrowUp, KeyAction::HistoryUp),
                (egui::Modifiers::NONE, egui::Key::ArrowDown, KeyAction::HistoryDown),
                (egui::Modifiers::NONE, egui::Key::Tab, KeyAction::Autocomplete),
                (egui::Modifiers::CTRL, egui::Key::C, KeyAction::ClearInput),
                (egui::Modifiers::CTRL, egui::Key::L, KeyAction::ClearHistory),
            ];
            let actions: Vec<KeyAction> = bindings
                .into_iter()
                .filter(|(modifiers, key, _)| input.consume_key(*modifiers, *key))
                .map(|(_, _, action)| action)
                .collect();
            (shortcuts, actions)
        });

        for shortcut in shortcuts {
            self.handle_shortcut(shortcut);
        }
        for action in actions {
            self.handle_action(ctx, action);
        }
    }

    fn handle_action(&mut self, ctx: &egui::Context, action: KeyAction) {
        if action != KeyAction::Autocomplete {
            self.candidates.clear();
        }

        if action == KeyAction::Submit {
            self.notice = None;
            let session = self.session.clone();
            let ctx = ctx.clone();
            self.runtime.spawn(async move {
                session.handle_key(KeyAction::Submit).await;
                ctx.request_repaint();
            });
            return;
        }

        match self.runtime.block_on(self.session.handle_key(action)) {
            KeyOutcome::Completed(result) => {
                self.cursor_to_end = result.accepted().is_some();
                self.candidates = result.candidates;
            }
            KeyOutcome::Handled => {
                self.cursor_to_end =
                    matches!(action, KeyAction::HistoryUp | KeyAction::HistoryDown);
            }
            KeyOutcome::Executed(_) => {}
        }
    }

    fn handle_shortcut(&mut self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::ToggleTheme => {
                self.session.toggle_theme();
            }
            Shortcut::ExportSession => {
                let export = self.session.export_session();
                let path = PathBuf::from(export.default_file_name());
                self.notice = Some(match export.write_to(&path) {
                    Ok(()) => {
                        info!("Session exported to {}", path.display());
                        format!("Session exported to {}", path.display())
                    }
                    Err(e) => {
                        error!("Failed to export session: {}", e);
                        format!("Export failed: {}", e)
                    }
                });
            }
        }
    }

    fn apply_theme(&mut self, ctx: &egui::Context, theme: Theme) {
        if self.applied_theme != Some(theme) {
            ctx.set_visuals(colors::visuals(theme));
            self.applied_theme = Some(theme);
            debug!("Applied {} visuals", theme.as_str());
        }
    }

    /// Save the session and stop background work
    fn shutdown(&mut self) {
        info!("MatrixTerm application shutting down");
        self.frame_loop.stop();
        self.session.shutdown();

        let Some(data_dir) = dirs::data_dir() else {
            warn!("No data directory; session not saved");
            return;
        };
        let path = data_dir.join("matrixterm").join(LAST_SESSION_FILE);
        match self.session.export_session().write_to(&path) {
            Ok(()) => info!("Session saved to {}", path.display()),
            Err(e) => warn!("Failed to save session to {}: {}", path.display(), e),
        }
    }
}

impl eframe::App for MatrixTermApp {
    // eframe 0.34 requires `ui`; rendering stays in `update`, which the
    // runner still calls before `ui` every frame.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard(ctx);

        let state = self.session.state();
        self.apply_theme(ctx, state.theme);
        let palette = UiColors::for_theme(state.theme);
        let style = TextStyle {
            colors: &palette,
            font_size: self.config.ui.font_size,
        };
        let prompt = self.config.terminal.prompt.as_str();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(palette.background))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                matrix_view::paint(ui.painter(), rect, &mut self.surface.lock());

                egui::Frame::new()
                    .inner_margin(egui::Margin::same(16))
                    .show(ui, |ui| {
                        ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                            if let Some(notice) = &self.notice {
                                ui.label(
                                    egui::RichText::new(notice)
                                        .font(egui::FontId::monospace(style.font_size * 0.9))
                                        .color(palette.muted),
                                );
                            }
                            terminal_view::show_candidates(ui, &self.candidates, style);
                            terminal_view::show_prompt(
                                ui,
                                &self.session,
                                &state,
                                prompt,
                                self.cursor_to_end,
                                style,
                            );

                            ui.allocate_ui_with_layout(
                                ui.available_size(),
                                egui::Layout::top_down(egui::Align::LEFT),
                                |ui| {
                                    terminal_view::show_history(
                                        ui,
                                        &self.session,
                                        &state,
                                        prompt,
                                        style,
                                    );
                                },
                            );
                        });
                    });
            });
        self.cursor_to_end = false;

        // The frame loop repaints while the rain moves; reveals and running
        // commands need their own repaints when it is paused.
        if state.is_processing || self.session.reveals().active() > 0 {
            ctx.request_repaint_after(REVEAL_REPAINT_INTERVAL);
        }
    }
}

impl Drop for MatrixTermApp {
    fn drop(&mut self) {
        self.shutdown();
    }
}
