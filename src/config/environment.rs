//! Environment variable loading and management.

use std::env;
use std::path::Path;

/// Environment variable that overrides the configured API base URL.
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Loads environment variables from .env file and system environment.
#[derive(Debug, Clone)]
pub struct EnvironmentLoader {
    env_file: Option<String>,
}

impl EnvironmentLoader {
    /// Initialize the environment loader.
    ///
    /// # Arguments
    /// * `env_file` - Path to .env file. Only an explicit path is loaded.
    pub fn new(env_file: Option<&Path>) -> Self {
        if let Some(path) = env_file {
            if path.exists() {
                if let Err(e) = dotenv::from_path(path) {
                    tracing::warn!("Failed to load .env file {}: {}", path.display(), e);
                }
            } else {
                tracing::warn!(".env file {} does not exist", path.display());
            }
        }

        Self {
            env_file: env_file.map(|p| p.to_string_lossy().to_string()),
        }
    }

    /// Load `.env` from the current directory if present.
    pub fn from_current_dir() -> Self {
        if let Err(e) = dotenv::dotenv() {
            tracing::debug!("No .env loaded from current directory: {}", e);
        }
        Self { env_file: None }
    }

    /// The .env file that was requested, if any.
    pub fn env_file(&self) -> Option<&str> {
        self.env_file.as_deref()
    }

    /// API key stored in `var`. Empty values count as missing.
    pub fn api_key(&self, var: &str) -> Option<String> {
        env::var(var).ok().filter(|v| !v.trim().is_empty())
    }

    /// Base URL override from `OPENAI_BASE_URL`.
    pub fn base_url_override(&self) -> Option<String> {
        env::var(BASE_URL_VAR).ok().filter(|v| !v.trim().is_empty())
    }
}

impl Default for EnvironmentLoader {
    fn default() -> Self {
        Self::new(None)
    }
}
