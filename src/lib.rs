//! MatrixTerm - An interactive shell over a live "digital rain" background
//!
//! This library provides the core of MatrixTerm: a small command shell
//! (registry, dispatcher, history, completion) and the rain animation it can
//! reconfigure at runtime. Everything except [`ui`] is headless and can be
//! driven directly from tests.
//!
//! ## Module Organization
//!
//! ### Shell
//!
//! - [`terminal`] - The session engine: submit, recall, complete, reveal
//! - [`commands`] - Command registry, dispatcher and built-in commands
//! - [`state_manager`] - Observable session state store
//! - [`history`] - Up/down command recall
//! - [`completion`] - Tab completion
//! - [`models`] - Output, history entries, session state and export
//!
//! ### Animation
//!
//! - [`animation`] - Rain engine, drawing surfaces, control bus, frame loop
//!
//! ### Application
//!
//! - [`config`] - Configuration files and defaults
//! - [`ui`] - The `eframe` front end
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use matrixterm::{init, ControlBus, TerminalSession};
//!
//! # async fn run() -> matrixterm::Result<()> {
//! let config = init()?;
//! let bus = Arc::new(ControlBus::new(config.animation.to_animation_config()));
//! let session = TerminalSession::from_config(&config, bus.clone());
//!
//! session.submit("matrix speed 4").await;
//! assert_eq!(bus.current_state().speed(), 4.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Main Thread:** Runs the `egui` UI loop and paints the glyph grid
//! - **Tokio Runtime:** Runs submitted commands, output reveals and the
//!   animation frame loop
//!
//! Commands never touch the renderer directly; they go through the
//! [`ControlBus`], which caches settings while no engine is attached.

pub mod animation;
pub mod commands;
pub mod completion;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod state_manager;
pub mod terminal;
pub mod ui;

use std::path::Path;

use tracing::{info, warn};

pub use animation::{AnimationConfig, ControlBus, FrameLoop, GlyphGrid, MatrixEngine, SharedEngine};
pub use commands::{Command, CommandRegistry, Dispatcher};
pub use config::{Config, ConfigLoader};
pub use error::{Error, Result};
pub use models::{HistoryEntry, Output, OutputKind, SessionExport, SessionState, Theme};
pub use state_manager::SessionStore;
pub use terminal::{KeyAction, TerminalSession};

/// The current version of MatrixTerm from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The application description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Load configuration from the default locations.
///
/// A file that fails validation is reported and replaced by the defaults,
/// so the application can always start.
pub fn init() -> Result<Config> {
    info!("🚀 Initializing {} v{}", NAME, VERSION);

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration: {}. Using defaults", e);
            Config::default()
        }
    };

    info!("✅ Configuration ready");
    Ok(config)
}

/// Load configuration from `config_path`. Unlike [`init`], errors are returned.
pub fn init_with_config(config_path: &Path) -> Result<Config> {
    info!(
        "🚀 Initializing {} v{} with config: {}",
        NAME,
        VERSION,
        config_path.display()
    );

    let config = ConfigLoader::new().load_config(Some(config_path))?;
    info!("✅ Custom configuration loaded");
    Ok(config)
}

/// User-facing explanation of a startup failure
pub fn handle_startup_error(error: &Error) -> String {
    match error {
        Error::ConfigLoadFailed { path, reason } => format!(
            "Configuration Error: Failed to load config from '{}': {}\n\nTry:\n• Check the path passed with --config\n• Ensure file permissions are correct",
            path.display(),
            reason
        ),
        Error::ConfigParseFailed { format, reason } => format!(
            "Configuration Error: Failed to parse {} config: {}\n\nTry:\n• Check configuration file syntax\n• Ensure file is valid {}",
            format, reason, format
        ),
        Error::ConfigValidationFailed { field, reason } => format!(
            "Configuration Error: Validation failed for '{}': {}\n\nTry:\n• Check the allowed range of the value\n• Remove the field to use its default",
            field, reason
        ),
        Error::Io(err) => format!(
            "I/O Error: {}\n\nTry:\n• Check file permissions\n• Ensure required directories exist",
            err
        ),
        _ => format!(
            "Unexpected Error: {}\n\nPlease report this issue with debug logs enabled",
            error
        ),
    }
}
