//! CLI error types.

use pi_engine::EstimateError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `pi-estimate`.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The estimator rejected its input or failed to run.
    #[error(transparent)]
    Estimate(#[from] EstimateError),

    /// An explicitly requested file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A command argument is outside what the command supports.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
