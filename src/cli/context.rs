//! Shared state for command execution.

use crate::cli::error::{CliError, CliResult};
use crate::config::{ConfigurationLoader, EnvironmentLoader};
use crate::observability::SessionLog;
use crate::provider::{LlmProvider, OpenAiProvider};
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Loaded configuration and environment.
#[derive(Debug)]
pub struct CommandContext {
    /// Parsed configuration file, or defaults
    pub config: ConfigurationLoader,
    /// `.env` loading state
    pub env: EnvironmentLoader,
}

impl CommandContext {
    /// Load configuration and environment.
    ///
    /// Without an explicit `env_file`, a `.env` in the working directory is
    /// picked up if present. An explicit `env_file` must exist.
    pub fn load(config_path: Option<&Path>, env_file: Option<&Path>) -> CliResult<Self> {
        let config = ConfigurationLoader::new(config_path).map_err(CliError::config)?;
        let env = match env_file {
            Some(path) if !path.exists() => {
                return Err(CliError::ConfigError(format!(
                    ".env file {} does not exist",
                    path.display()
                )))
            }
            Some(path) => EnvironmentLoader::new(Some(path)),
            None => EnvironmentLoader::from_current_dir(),
        };
        Ok(Self { config, env })
    }

    /// Context over an already-built configuration; no files are read.
    pub fn from_parts(config: ConfigurationLoader, env: EnvironmentLoader) -> Self {
        Self { config, env }
    }

    /// One-line description of where the configuration came from.
    pub fn config_source(&self) -> String {
        let path = &self.config.config_path;
        if path.exists() {
            format!("Loaded configuration from {}", path.display())
        } else {
            format!("No configuration at {}, using defaults", path.display())
        }
    }

    /// Chat-completions provider from the configuration.
    pub fn provider(&self) -> CliResult<Arc<dyn LlmProvider>> {
        let provider = OpenAiProvider::from_config(&self.config, &self.env).map_err(CliError::provider)?;
        Ok(Arc::new(provider))
    }

    /// Session log in the configured directory, when enabled by config or `force`.
    ///
    /// A log that cannot be created is reported and skipped.
    pub fn session_log(&self, model: &str, max_iterations: usize, force: bool) -> Option<SessionLog> {
        if !(force || self.config.config.logging.session_log) {
            return None;
        }
        match SessionLog::create(&self.config.log_dir(), model, max_iterations) {
            Ok(log) => Some(log),
            Err(e) => {
                warn!("Session log disabled: {:#}", e);
                None
            }
        }
    }
}
