//! Command history recall
//!
//! Up/down navigation over previously submitted inputs. The cursor counts
//! back from the most recent command: index 0 is the last submitted input,
//! and -1 means "not recalling" (the prompt shows whatever the user typed).

/// Direction of a history recall step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    /// Older command (ArrowUp)
    Up,
    /// Newer command (ArrowDown)
    Down,
}

/// Cursor value meaning "not currently recalling"
pub const NOT_RECALLING: isize = -1;

/// Result of one navigation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recall {
    /// New cursor value
    pub index: isize,
    /// Command text to place in the prompt
    pub text: String,
}

/// Step through `command_history` from `index` in `direction`.
///
/// With an empty history nothing moves and the recalled text is empty.
pub fn navigate(direction: HistoryDirection, command_history: &[String], index: isize) -> Recall {
    if command_history.is_empty() {
        return Recall {
            index,
            text: String::new(),
        };
    }

    let last = command_history.len() as isize - 1;
    let new_index = match direction {
        HistoryDirection::Up => (index + 1).min(last),
        HistoryDirection::Down => (index - 1).max(NOT_RECALLING),
    };

    let text = if new_index == NOT_RECALLING {
        String::new()
    } else {
        command_history[(last - new_index) as usize].clone()
    };

    Recall {
        index: new_index,
        text,
    }
}
