//! Configuration management.
//!
//! This module provides configuration loading through TOML files and
//! environment variable management via `.env` files.
//!
//! # Example
//!
//! ```no_run
//! use tool_agent::config::{ConfigurationLoader, EnvironmentLoader};
//! use std::path::Path;
//!
//! let env = EnvironmentLoader::new(Some(Path::new(".env")));
//! let config_loader = ConfigurationLoader::new(Some(Path::new("config/agent.toml"))).unwrap();
//!
//! println!("Planner budget: {}", config_loader.config.planner.max_iterations);
//! println!("Key present: {}", env.api_key("OPENAI_API_KEY").is_some());
//! ```

pub mod config;
pub mod environment;

pub use self::config::{
    AgentConfig, Configuration, ConfigurationLoader, ExecutorConfig, LlmConfig, LoggingConfig,
    PlannerConfig,
};
pub use self::environment::EnvironmentLoader;
