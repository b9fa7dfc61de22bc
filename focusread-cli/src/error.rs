//! Error handling for the CLI application

use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// File not found or inaccessible
    #[error("File not found: {0}")]
    FileNotFound(String),
    /// Invalid file pattern
    #[error("Invalid file pattern: {0}")]
    InvalidPattern(String),
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Feature name given on the command line or in a config file is unknown
    #[error("Unknown feature: {0} (expected one of global, bionic, highlight, beeline, ruler, spacing, focus)")]
    UnknownFeature(String),
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
