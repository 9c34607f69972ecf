//! Shell commands
//!
//! A [`Command`] pairs a name, a description and its aliases with a
//! [`CommandHandler`]. Commands are registered once in a
//! [`CommandRegistry`] and run through the [`Dispatcher`], which turns every
//! outcome (including failures) into an [`Output`].
//!
//! - [`registry`] - Name and alias lookup, autocomplete keys
//! - [`dispatcher`] - Input parsing and error normalisation
//! - [`builtin`] - The informational commands and the default registry
//! - [`matrix`] - The `matrix` command controlling the rain animation

pub mod builtin;
pub mod dispatcher;
pub mod matrix;
pub mod registry;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Output;

pub use dispatcher::Dispatcher;
pub use registry::CommandRegistry;

/// What a handler can see besides its arguments
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    /// The registry the command was resolved from
    pub registry: &'a CommandRegistry,
    /// The token the user typed (may be an alias, any case)
    pub invoked_as: &'a str,
}

/// Behaviour of a command
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Run with the positional arguments that followed the command name
    async fn execute(&self, ctx: &CommandContext<'_>, args: &[String]) -> Result<Output>;
}

/// Adapter turning a synchronous closure into a [`CommandHandler`]
pub struct FnHandler<F>(F);

#[async_trait]
impl<F> CommandHandler for FnHandler<F>
where
    F: Fn(&CommandContext<'_>, &[String]) -> Result<Output> + Send + Sync,
{
    async fn execute(&self, ctx: &CommandContext<'_>, args: &[String]) -> Result<Output> {
        (self.0)(ctx, args)
    }
}

/// A named operation invocable from the shell
#[derive(Clone)]
pub struct Command {
    name: String,
    description: String,
    aliases: Vec<String>,
    handler: Arc<dyn CommandHandler>,
}

impl Command {
    /// Create a command. Name and aliases are stored lowercased.
    pub fn new(
        name: &str,
        description: &str,
        handler: impl CommandHandler + 'static,
    ) -> Self {
        Self {
            name: name.to_lowercase(),
            description: description.to_string(),
            aliases: Vec::new(),
            handler: Arc::new(handler),
        }
    }

    /// Create a command from a synchronous closure
    pub fn from_fn<F>(name: &str, description: &str, handler: F) -> Self
    where
        F: Fn(&CommandContext<'_>, &[String]) -> Result<Output> + Send + Sync + 'static,
    {
        Self::new(name, description, FnHandler(handler))
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_lowercase());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Run the handler
    pub async fn execute(&self, ctx: &CommandContext<'_>, args: &[String]) -> Result<Output> {
        self.handler.execute(ctx, args).await
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}
