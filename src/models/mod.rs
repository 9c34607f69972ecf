//! Core data models for MatrixTerm
//!
//! This module contains the data structures shared by the terminal session
//! engine and its views: command outputs, history entries and the session
//! snapshot.

pub mod history_entry;
pub mod output;
pub mod session_state;

// Re-exports for convenience
pub use history_entry::HistoryEntry;
pub use output::{Output, OutputKind};
pub use session_state::{SessionExport, SessionState, Theme};
