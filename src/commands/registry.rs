//! Command registry
//!
//! Maps lowercase names and aliases to commands. Keys keep the order they
//! were first registered in, which is also the order autocomplete reports.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::Command;

/// Name and alias lookup for registered commands
#[derive(Debug, Default)]
pub struct CommandRegistry {
    /// Every key (names and aliases) in registration order
    keys: Vec<String>,
    entries: HashMap<String, Arc<Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under its name and every alias.
    ///
    /// A key that is already taken now points at the new command but keeps
    /// its position in the key order.
    pub fn register(&mut self, command: Command) {
        let command = Arc::new(command);
        let keys = std::iter::once(command.name().to_string())
            .chain(command.aliases().iter().cloned());

        for key in keys {
            if self.entries.insert(key.clone(), Arc::clone(&command)).is_some() {
                debug!("Command key '{}' re-registered", key);
            } else {
                self.keys.push(key);
            }
        }
    }

    /// Case-insensitive lookup by name or alias
    pub fn resolve(&self, token: &str) -> Option<Arc<Command>> {
        self.entries.get(&token.to_lowercase()).cloned()
    }

    /// All keys, names and aliases alike, in registration order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Keys starting with `prefix` (case-insensitive), in registration order
    pub fn autocomplete(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        self.keys
            .iter()
            .filter(|key| key.starts_with(&prefix))
            .cloned()
            .collect()
    }

    /// Distinct commands in registration order.
    ///
    /// A command reachable through several keys is listed once.
    pub fn commands(&self) -> Vec<Arc<Command>> {
        let mut seen: Vec<Arc<Command>> = Vec::new();
        for key in &self.keys {
            if let Some(command) = self.entries.get(key) {
                if !seen.iter().any(|c| Arc::ptr_eq(c, command)) {
                    seen.push(Arc::clone(command));
                }
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
