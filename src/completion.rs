//! Command Completion
//!
//! Tab completion over registered command names and aliases. A single
//! candidate is accepted into the prompt; otherwise the candidates are
//! returned for display and the prompt is left alone.

use crate::commands::CommandRegistry;

/// Candidates for one completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    /// The text that was completed
    pub prefix: String,
    /// Matching keys, in registration order
    pub candidates: Vec<String>,
}

impl CompletionResult {
    /// The replacement input, when the match is unambiguous
    pub fn accepted(&self) -> Option<&str> {
        match self.candidates.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Complete `prefix` against every registered key
pub fn complete(registry: &CommandRegistry, prefix: &str) -> CompletionResult {
    CompletionResult {
        prefix: prefix.to_string(),
        candidates: registry.autocomplete(prefix),
    }
}
