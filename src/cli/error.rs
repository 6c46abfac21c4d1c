//! Error types for CLI operations

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur during CLI command execution
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Provider construction error
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Error executing a command
    #[error("Execution error: {0}")]
    ExecutionError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CliError {
    /// Wrap an `anyhow` error as a configuration error, keeping its context chain.
    pub fn config(error: anyhow::Error) -> Self {
        Self::ConfigError(format!("{:#}", error))
    }

    /// Wrap an `anyhow` error as a provider error.
    pub fn provider(error: anyhow::Error) -> Self {
        Self::ProviderError(format!("{:#}", error))
    }

    /// Wrap an `anyhow` error as an execution error.
    pub fn execution(error: anyhow::Error) -> Self {
        Self::ExecutionError(format!("{:#}", error))
    }
}
