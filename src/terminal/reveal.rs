//! Progressive output reveal
//!
//! Long outputs can ask to be revealed gradually ("typed out"). The
//! scheduler runs one task per revealing entry and publishes how much of
//! each entry is visible. Plain text appears one character per delay;
//! markup appears all at once after a single delay, since cutting it
//! mid-way would show broken formatting.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::debug;

use crate::models::Output;

/// How far an entry's reveal has progressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealProgress {
    /// Characters currently visible
    pub visible_chars: usize,
    pub total_chars: usize,
}

impl RevealProgress {
    pub fn is_complete(&self) -> bool {
        self.visible_chars >= self.total_chars
    }
}

/// Reveal state of every entry still being revealed, by entry id
pub type RevealMap = HashMap<u64, RevealProgress>;

/// Runs reveal tasks and publishes their progress
#[derive(Debug)]
pub struct RevealScheduler {
    tasks: Mutex<JoinSet<()>>,
    progress: watch::Sender<RevealMap>,
}

impl RevealScheduler {
    pub fn new() -> Self {
        let (progress, _) = watch::channel(RevealMap::new());
        Self {
            tasks: Mutex::new(JoinSet::new()),
            progress,
        }
    }

    /// Start revealing `output` for entry `entry_id`.
    ///
    /// Outputs without a (non-zero) reveal delay are shown immediately and
    /// nothing is scheduled. Must be called inside a Tokio runtime.
    pub fn schedule(&self, entry_id: u64, output: &Output) {
        let delay = match output.reveal_delay_ms {
            Some(ms) if ms > 0 => Duration::from_millis(ms),
            _ => return,
        };
        let total_chars = output.content.chars().count();
        if total_chars == 0 {
            return;
        }

        self.progress.send_modify(|map| {
            map.insert(
                entry_id,
                RevealProgress {
                    visible_chars: 0,
                    total_chars,
                },
            );
        });

        let progress = self.progress.clone();
        let is_markup = output.is_markup;
        let step = if is_markup { total_chars } else { 1 };

        let mut tasks = self.tasks.lock();
        while tasks.try_join_next().is_some() {}
        tasks.spawn(async move {
            let mut visible = 0;
            if is_markup {
                tokio::time::sleep(delay).await;
            }
            loop {
                visible = (visible + step).min(total_chars);
                let done = visible == total_chars;
                progress.send_modify(|map| {
                    if done {
                        map.remove(&entry_id);
                    } else if let Some(entry) = map.get_mut(&entry_id) {
                        entry.visible_chars = visible;
                    }
                });
                if done {
                    break;
                }
                tokio::time::sleep(delay).await;
            }
        });
        debug!(entry_id, total_chars, ?delay, "Reveal scheduled");
    }

    /// The visible part of `content` for `entry_id`
    pub fn visible<'a>(&self, entry_id: u64, content: &'a str) -> &'a str {
        match self.progress.borrow().get(&entry_id) {
            Some(progress) => prefix_chars(content, progress.visible_chars),
            None => content,
        }
    }

    pub fn is_revealing(&self, entry_id: u64) -> bool {
        self.progress.borrow().contains_key(&entry_id)
    }

    /// Number of entries still being revealed
    pub fn active(&self) -> usize {
        self.progress.borrow().len()
    }

    /// Receiver notified on every progress step
    pub fn subscribe(&self) -> watch::Receiver<RevealMap> {
        self.progress.subscribe()
    }

    /// Abort every pending reveal. Affected entries show in full.
    pub fn cancel_all(&self) {
        let mut tasks = self.tasks.lock();
        if !tasks.is_empty() {
            debug!(pending = tasks.len(), "Cancelling reveals");
        }
        tasks.abort_all();
        while tasks.try_join_next().is_some() {}
        self.progress.send_modify(|map| map.clear());
    }
}

impl Default for RevealScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// First `n` characters of `s`
pub fn prefix_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((index, _)) => &s[..index],
        None => s,
    }
}
