//! Terminal Session Engine
//!
//! [`TerminalSession`] turns keyboard input into state changes: it records
//! submitted commands, runs them through the dispatcher, attaches their
//! output, recalls history and completes command names. All state lives in
//! the [`SessionStore`]; the session itself only orchestrates.
//!
//! Commands run one at a time. A `submit` arriving while another command
//! is still running waits for it to finish first.

pub mod keys;
pub mod reveal;

pub use keys::{KeyAction, Shortcut};
pub use reveal::{RevealProgress, RevealScheduler};

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::animation::ControlBus;
use crate::commands::{builtin, Dispatcher};
use crate::completion::{self, CompletionResult};
use crate::config::Config;
use crate::history::{self, HistoryDirection};
use crate::models::{HistoryEntry, Output, SessionExport, SessionState, Theme};
use crate::state_manager::SessionStore;

/// What a key press produced
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    /// A command ran (`None` when nothing was dispatched)
    Executed(Option<Output>),
    /// Completion candidates for the current input
    Completed(CompletionResult),
    /// State changed, nothing to report
    Handled,
}

/// Interactive shell session
#[derive(Debug)]
pub struct TerminalSession {
    store: SessionStore,
    dispatcher: Dispatcher,
    reveals: RevealScheduler,
    /// Held for the whole of a submit
    submit_slot: Mutex<()>,
}

impl TerminalSession {
    /// Create a session whose history starts with `welcome_message` (markup)
    pub fn new(dispatcher: Dispatcher, theme: Theme, welcome_message: &str) -> Self {
        let mut state = SessionState::new(theme);
        if !welcome_message.is_empty() {
            state
                .history
                .push(HistoryEntry::system(0, Output::info(welcome_message).markup()));
        }

        Self {
            store: SessionStore::new(state),
            dispatcher,
            reveals: RevealScheduler::new(),
            submit_slot: Mutex::new(()),
        }
    }

    /// Create a session with the built-in commands
    pub fn from_config(config: &Config, bus: Arc<ControlBus>) -> Self {
        let registry = builtin::default_registry(config, bus);
        Self::new(
            Dispatcher::new(Arc::new(registry)),
            config.terminal.default_theme,
            &config.terminal.welcome_message,
        )
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn reveals(&self) -> &RevealScheduler {
        &self.reveals
    }

    /// Clone of the current state
    pub fn state(&self) -> SessionState {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.store.subscribe()
    }

    /// Replace the prompt text (as the user types)
    pub fn set_input(&self, input: &str) {
        self.store.set_input(input);
    }

    /// Run `raw_input` and record it.
    ///
    /// Blank input does nothing. `clear`/`cls` empty the history without
    /// dispatching; `theme` toggles the theme and is dispatched as well.
    /// Returns the output attached to the new history entry.
    pub async fn submit(&self, raw_input: &str) -> Option<Output> {
        let input = raw_input.trim();
        if input.is_empty() {
            return None;
        }

        let _slot = self.submit_slot.lock().await;

        if input.eq_ignore_ascii_case("clear") || input.eq_ignore_ascii_case("cls") {
            self.clear_history();
            self.store.set_input("");
            return None;
        }

        if input.eq_ignore_ascii_case("theme") {
            self.toggle_theme();
        }

        let entry_id = self.store.next_entry_id();
        self.store.update(|state| {
            state.is_processing = true;
            state.command_history.push(input.to_string());
            state.history_index = history::NOT_RECALLING;
            state.history.push(HistoryEntry::pending(entry_id, input));
        });
        debug!(entry_id, "Submitted '{}'", input);

        let output = self.dispatcher.dispatch(input).await;

        let attached_to = self.store.update(|state| {
            let attached_to = state.last_pending_entry_mut().map(|entry| {
                entry.attach_output(output.clone());
                entry.id
            });
            state.is_processing = false;
            state.current_input.clear();
            attached_to
        });

        match attached_to {
            Some(id) => self.reveals.schedule(id, &output),
            None => warn!("No pending history entry for '{}'", input),
        }

        Some(output)
    }

    /// Step through previously submitted commands.
    ///
    /// The recalled command replaces the current input. Returns it.
    pub fn navigate_history(&self, direction: HistoryDirection) -> String {
        self.store.update(|state| {
            if state.command_history.is_empty() {
                return String::new();
            }
            let recall = history::navigate(direction, &state.command_history, state.history_index);
            state.history_index = recall.index;
            state.current_input = recall.text.clone();
            recall.text
        })
    }

    /// Complete the current input against the command names.
    ///
    /// A single match replaces the input; otherwise the input is kept.
    pub fn autocomplete(&self) -> CompletionResult {
        let prefix = self.store.read(|state| state.current_input.clone());
        let result = completion::complete(self.dispatcher.registry(), &prefix);
        if let Some(accepted) = result.accepted() {
            self.store.set_input(accepted);
        }
        result
    }

    /// Empty the visible history. Command recall is unaffected.
    pub fn clear_history(&self) {
        self.reveals.cancel_all();
        self.store.update(|state| state.history.clear());
        debug!("History cleared");
    }

    pub fn toggle_theme(&self) -> Theme {
        let theme = self.store.update(|state| {
            state.theme = state.theme.toggled();
            state.theme
        });
        info!("Theme switched to {}", theme.as_str());
        theme
    }

    pub fn export_session(&self) -> SessionExport {
        self.store.read(SessionState::export)
    }

    /// Perform a keyboard action
    pub async fn handle_key(&self, action: KeyAction) -> KeyOutcome {
        match action {
            KeyAction::Submit => {
                let input = self.store.read(|state| state.current_input.clone());
                KeyOutcome::Executed(self.submit(&input).await)
            }
            KeyAction::HistoryUp => {
                self.navigate_history(HistoryDirection::Up);
                KeyOutcome::Handled
            }
            KeyAction::HistoryDown => {
                self.navigate_history(HistoryDirection::Down);
                KeyOutcome::Handled
            }
            KeyAction::Autocomplete => KeyOutcome::Completed(self.autocomplete()),
            KeyAction::ClearInput => {
                self.store.set_input("");
                KeyOutcome::Handled
            }
            KeyAction::ClearHistory => {
                self.clear_history();
                KeyOutcome::Handled
            }
        }
    }

    /// Stop all background work owned by the session
    pub fn shutdown(&self) {
        self.reveals.cancel_all();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}
