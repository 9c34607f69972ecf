//! History Entry Model
//!
//! One line of the visible terminal log: the command the user typed and the
//! output it produced. Entries are created before their output is known and
//! the output is attached once, when the command completes.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::models::Output;

/// A single entry in the terminal log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Sequence number, unique within a session
    pub id: u64,

    /// The raw command (empty for system messages such as the welcome banner)
    pub command: String,

    /// Output, absent while the command is still running
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Output>,

    /// When the entry was created (in local time)
    pub timestamp: DateTime<Local>,
}

impl HistoryEntry {
    /// Create an entry for a submitted command, without output yet
    pub fn pending(id: u64, command: impl Into<String>) -> Self {
        Self {
            id,
            command: command.into(),
            output: None,
            timestamp: Local::now(),
        }
    }

    /// Create a system message entry (no command, output already known)
    pub fn system(id: u64, output: Output) -> Self {
        Self {
            id,
            command: String::new(),
            output: Some(output),
            timestamp: Local::now(),
        }
    }

    /// Whether the entry is still waiting for its output
    pub fn is_pending(&self) -> bool {
        self.output.is_none()
    }

    pub fn is_system(&self) -> bool {
        self.command.is_empty()
    }

    /// Attach output to a pending entry.
    ///
    /// Returns `false` and leaves the entry untouched if it already had output.
    pub fn attach_output(&mut self, output: Output) -> bool {
        if self.output.is_some() {
            return false;
        }
        self.output = Some(output);
        true
    }
}
