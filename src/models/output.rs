//! Command Output Model
//!
//! The uniform shape every command result is normalized into before it is
//! attached to a history entry.

use serde::{Deserialize, Serialize};

/// Severity/category of an output, used for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// The command did what was asked
    Success,
    /// Something went wrong (unknown command, bad argument, handler failure)
    Error,
    /// Informational content
    #[default]
    Info,
    /// Completed, but the user should take note
    Warning,
}

/// Result of running a command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    /// Text or markup to display
    pub content: String,

    /// Category of the output
    pub kind: OutputKind,

    /// Render `content` as markup instead of literal text
    #[serde(default)]
    pub is_markup: bool,

    /// Reveal `content` progressively, one step per this many milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal_delay_ms: Option<u64>,
}

impl Output {
    /// Create a literal-text output of the given kind
    pub fn new(content: impl Into<String>, kind: OutputKind) -> Self {
        Self {
            content: content.into(),
            kind,
            is_markup: false,
            reveal_delay_ms: None,
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self::new(content, OutputKind::Success)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(content, OutputKind::Error)
    }

    pub fn info(content: impl Into<String>) -> Self {
        Self::new(content, OutputKind::Info)
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self::new(content, OutputKind::Warning)
    }

    /// Mark the content as markup
    pub fn markup(mut self) -> Self {
        self.is_markup = true;
        self
    }

    /// Request a progressive reveal with the given per-step delay
    pub fn with_reveal_delay(mut self, delay_ms: u64) -> Self {
        self.reveal_delay_ms = Some(delay_ms);
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == OutputKind::Error
    }
}
