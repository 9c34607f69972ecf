//! Session State Model
//!
//! Everything the terminal view needs to draw itself, published as one
//! immutable snapshot by the state store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::HistoryEntry;

/// Color scheme of the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Parse a theme name (case-insensitive)
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

/// Snapshot of a terminal session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Visible log of commands and outputs
    pub history: Vec<HistoryEntry>,
    /// Text currently in the prompt
    pub current_input: String,
    /// Submitted inputs, oldest first
    pub command_history: Vec<String>,
    /// Recall cursor into `command_history`, -1 when not recalling
    pub history_index: isize,
    /// A command is in flight
    pub is_processing: bool,
    pub theme: Theme,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl SessionState {
    /// Create an empty state with the given theme
    pub fn new(theme: Theme) -> Self {
        Self {
            history: Vec::new(),
            current_input: String::new(),
            command_history: Vec::new(),
            history_index: -1,
            is_processing: false,
            theme,
        }
    }

    /// Most recent entry still waiting for output
    pub fn last_pending_entry_mut(&mut self) -> Option<&mut HistoryEntry> {
        self.history.iter_mut().rev().find(|entry| entry.is_pending())
    }

    /// Build the serializable export of this state
    pub fn export(&self) -> SessionExport {
        SessionExport {
            timestamp: Utc::now(),
            history: self.history.clone(),
            theme: self.theme,
        }
    }
}

/// Serialized form of a session, as written by "export session"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionExport {
    /// When the export was taken
    pub timestamp: DateTime<Utc>,
    pub history: Vec<HistoryEntry>,
    pub theme: Theme,
}

impl SessionExport {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::SessionExportFailed {
            reason: e.to_string(),
        })
    }

    /// Parse a previously exported session
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Default file name for an export taken today
    pub fn default_file_name(&self) -> String {
        format!("terminal-session-{}.json", self.timestamp.format("%Y-%m-%d"))
    }

    /// Write the export to `path`, creating parent directories
    pub fn write_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
