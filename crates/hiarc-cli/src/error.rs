//! Error types for the CLI application.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No config file at the expected location
    #[error("No config file found at {}. Run `hiarc config init` first.", .0.display())]
    ConfigMissing(PathBuf),

    /// `config init` against an existing file
    #[error("Config file already exists at {}. Use `hiarc config add` to add a profile.", .0.display())]
    ConfigExists(PathBuf),

    /// Named profile is not in the config file
    #[error("Couldn't find a profile named {0}")]
    ProfileNotFound(String),

    /// SDK error
    #[error("{0}")]
    Sdk(#[from] hiarc_sdk::SdkError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Access level outside the four known grades
    #[error(transparent)]
    AccessLevel(#[from] hiarc_domain::InvalidAccessLevel),

    /// Blank entity key
    #[error(transparent)]
    Key(#[from] hiarc_domain::InvalidKey),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
