//! Command dispatch
//!
//! Splits raw input into a command token and arguments, runs the resolved
//! command and converts whatever happens into an [`Output`]. Dispatch never
//! fails: unknown commands, handler errors and handler panics all come back
//! as error outputs.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, error, warn};

use super::{CommandContext, CommandRegistry};
use crate::error::Error;
use crate::models::Output;

/// Runs commands from a shared registry
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Parse and run `raw_input`
    pub async fn dispatch(&self, raw_input: &str) -> Output {
        let mut tokens = raw_input.split_whitespace();
        let name = tokens.next().unwrap_or_default();
        let args: Vec<String> = tokens.map(str::to_string).collect();

        let Some(command) = self.registry.resolve(name) else {
            debug!("Unknown command '{}'", name);
            return Output::error(
                Error::CommandNotFound {
                    command: name.to_string(),
                }
                .to_string(),
            );
        };

        debug!(command = command.name(), ?args, "Dispatching command");
        let ctx = CommandContext {
            registry: &self.registry,
            invoked_as: name,
        };

        match AssertUnwindSafe(command.execute(&ctx, &args))
            .catch_unwind()
            .await
        {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => Self::error_output(command.name(), e),
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Command '{}' panicked: {}", command.name(), message);
                Output::error(format!("Error executing command: {}", message))
            }
        }
    }

    fn error_output(command: &str, e: Error) -> Output {
        match e {
            Error::InvalidParameter { parameter, usage } => {
                debug!("Command '{}' rejected parameter '{}'", command, parameter);
                Output::error(usage)
            }
            Error::CommandNotFound { .. } => Output::error(e.to_string()),
            e => {
                warn!("Command '{}' failed: {}", command, e);
                Output::error(format!("Error executing command: {}", e))
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "command panicked".to_string()
    }
}
