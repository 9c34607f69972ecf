//! Error types and Result aliases for MatrixTerm

use std::path::PathBuf;

/// Result type alias for MatrixTerm operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for MatrixTerm
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // === Command errors ===
    /// No registered command matches the typed token
    #[error("Command not found: {command}. Type 'help' for available commands.")]
    CommandNotFound { command: String },

    /// A command handler failed while running
    #[error("Command '{command}' failed: {reason}")]
    CommandExecutionFailed { command: String, reason: String },

    /// A command received a malformed or out-of-range argument.
    ///
    /// Displays as the usage text alone, since that is what the user sees.
    #[error("{usage}")]
    InvalidParameter { parameter: String, usage: String },

    // === Configuration errors ===
    /// No configuration file was found and defaults were not requested
    #[error("Configuration file not found")]
    ConfigNotFound,

    /// Failed to read a configuration file
    #[error("Failed to load configuration from {}: {reason}", .path.display())]
    ConfigLoadFailed { path: PathBuf, reason: String },

    /// Failed to parse a configuration file
    #[error("Failed to parse {format} configuration: {reason}")]
    ConfigParseFailed { format: String, reason: String },

    /// Configuration value outside its allowed range
    #[error("Invalid configuration for '{field}': {reason}")]
    ConfigValidationFailed { field: String, reason: String },

    /// Failed to serialize configuration
    #[error("Failed to serialize configuration as {format}: {reason}")]
    ConfigSerializationFailed { format: String, reason: String },

    // === Session errors ===
    /// Failed to export the terminal session
    #[error("Failed to export session: {reason}")]
    SessionExportFailed { reason: String },

    // === I/O and serialization errors ===
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    // === Generic fallback (use sparingly) ===
    /// Generic errors (for cases not yet categorized)
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build an [`Error::InvalidParameter`] from a parameter name and usage line
    pub fn invalid_parameter(parameter: impl Into<String>, usage: impl Into<String>) -> Self {
        Error::InvalidParameter {
            parameter: parameter.into(),
            usage: usage.into(),
        }
    }

    /// Whether the error is safe to show to the user verbatim
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::CommandNotFound { .. } | Error::InvalidParameter { .. }
        )
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}
