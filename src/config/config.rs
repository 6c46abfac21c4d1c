//! TOML configuration parsing and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// `[agent]`
    pub agent: AgentConfig,
    /// `[llm]`
    pub llm: LlmConfig,
    /// `[logging]`
    pub logging: LoggingConfig,
    /// `[planner]`
    pub planner: PlannerConfig,
    /// `[executor]`
    pub executor: ExecutorConfig,
}

/// Agent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Name used in log lines
    pub name: String,
    /// Default model for every agent
    pub model: String,
    /// Model turns allowed per run
    pub max_iterations: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: "tool-agent".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_iterations: 20,
        }
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API root, e.g. `https://api.openai.com/v1`
    pub base_url: String,
    /// Path appended to `base_url`
    pub endpoint: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            endpoint: "chat/completions".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for JSON session logs
    pub log_dir: String,
    /// Console level for this crate; `RUST_LOG` takes precedence
    pub log_level: String,
    /// Write a session log for every agent run
    pub session_log: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            log_level: "INFO".to_string(),
            session_log: false,
        }
    }
}

/// Planner agent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Model turns allowed for planning
    pub max_iterations: u32,
    /// Overrides `agent.model` for the planner
    pub model: Option<String>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            model: None,
        }
    }
}

/// Executor agent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Model turns allowed per action item
    pub max_iterations: u32,
    /// Overrides `agent.model` for the executor
    pub model: Option<String>,
    /// Upper bound, in characters, on collaborator data embedded in each executor prompt
    pub experience_char_limit: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            model: None,
            experience_char_limit: 12_000,
        }
    }
}

/// Loads and manages TOML configuration.
#[derive(Debug)]
pub struct ConfigurationLoader {
    /// File the configuration was read from, or would have been
    pub config_path: PathBuf,
    /// Parsed configuration
    pub config: Configuration,
}

impl ConfigurationLoader {
    /// Initialize configuration loader.
    ///
    /// # Arguments
    /// * `config_path` - Path to TOML config file. If None, `config/agent.toml`
    ///   is tried; a missing file yields the default configuration.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config_path = config_path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("config/agent.toml"));

        let config = if config_path.exists() {
            Self::load_config(&config_path)?
        } else {
            Self::get_default_config()
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Create a configuration loader from a pre-parsed Configuration.
    pub fn from_config(config: Configuration) -> Self {
        Self {
            config_path: PathBuf::from("config/agent.toml"),
            config,
        }
    }

    /// Load configuration from TOML file.
    fn load_config(path: &Path) -> Result<Configuration> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }

    /// Get default configuration.
    fn get_default_config() -> Configuration {
        Configuration::default()
    }

    /// Get configuration value by dot-notation key.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match key {
            "agent.name" => Some(self.config.agent.name.clone()),
            "agent.model" => Some(self.config.agent.model.clone()),
            "llm.base_url" => Some(self.config.llm.base_url.clone()),
            "llm.endpoint" => Some(self.config.llm.endpoint.clone()),
            "llm.api_key_env" => Some(self.config.llm.api_key_env.clone()),
            "logging.log_dir" => Some(self.config.logging.log_dir.clone()),
            "logging.log_level" => Some(self.config.logging.log_level.clone()),
            "planner.model" => Some(self.planner_model()),
            "executor.model" => Some(self.executor_model()),
            _ => None,
        }
    }

    /// Get numeric configuration value.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        match key {
            "agent.max_iterations" => Some(self.config.agent.max_iterations as u64),
            "planner.max_iterations" => Some(self.config.planner.max_iterations as u64),
            "executor.max_iterations" => Some(self.config.executor.max_iterations as u64),
            "executor.experience_char_limit" => {
                Some(self.config.executor.experience_char_limit as u64)
            }
            _ => None,
        }
    }

    /// Get boolean configuration value.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match key {
            "logging.session_log" => Some(self.config.logging.session_log),
            _ => None,
        }
    }

    /// Model used by the planner agent.
    pub fn planner_model(&self) -> String {
        self.config
            .planner
            .model
            .clone()
            .unwrap_or_else(|| self.config.agent.model.clone())
    }

    /// Model used by the executor agent.
    pub fn executor_model(&self) -> String {
        self.config
            .executor
            .model
            .clone()
            .unwrap_or_else(|| self.config.agent.model.clone())
    }

    /// Directory for session logs.
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.logging.log_dir)
    }
}
