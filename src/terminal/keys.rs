//! Keyboard actions understood by the terminal session

/// Session-level action triggered from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Enter: run the current input
    Submit,
    /// ArrowUp: recall an older command
    HistoryUp,
    /// ArrowDown: recall a newer command
    HistoryDown,
    /// Tab: complete the current input
    Autocomplete,
    /// Ctrl+C: discard the current input
    ClearInput,
    /// Ctrl+L: clear the visible history
    ClearHistory,
}

/// Application-level shortcut handled outside the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shortcut {
    /// Ctrl+Shift+T
    ToggleTheme,
    /// Ctrl+Shift+E
    ExportSession,
}
