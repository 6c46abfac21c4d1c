//! Tool-calling LLM agents with a planner/executor driver.
//!
//! - **`invoker`** - Tool declarations, contract derivation, fail-closed invocation and result text
//! - **`provider`** - The model transport trait and an OpenAI-compatible HTTP implementation
//! - **`agent`** - The conversation state machine that alternates model turns and tool calls
//! - **`plan`** - A shared plan store, the planner's enqueue tool and the planner/executor loop
//! - **`config`** - TOML configuration and `.env` loading
//! - **`observability`** - JSON session logs
//! - **`tools`** - Ready-made file and feedback tools
//! - **`cli`** - Command-line front end (enabled with the `cli` feature)
//!
//! # Features
//!
//! ```toml
//! [dependencies]
//! tool-agent = { version = "0.1", default-features = false }
//! # HTTP transport only:
//! tool-agent = { version = "0.1", default-features = false, features = ["openai"] }
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tool_agent::agent::{Agent, RunStatus};
//! use tool_agent::invoker::{Tool, ToolRegistry};
//! use tool_agent::provider::{GenerateConfig, GenerateResponse, LlmProvider, Message};
//!
//! struct Done;
//!
//! #[async_trait::async_trait]
//! impl LlmProvider for Done {
//!     async fn generate(&self, _: &[Message], _: &GenerateConfig) -> anyhow::Result<GenerateResponse> {
//!         Ok(GenerateResponse::text("Task complete"))
//!     }
//!     fn provider_name(&self) -> &str {
//!         "done"
//!     }
//! }
//!
//! # tokio_test_block_on(async {
//! let mut agent = Agent::new("You are terse.", Arc::new(Done))
//!     .with_tools(ToolRegistry::from_tools([Tool::new("noop", |_| Ok(serde_json::Value::Null))]).unwrap());
//! let result = agent.run("Say hi").await;
//! assert_eq!(result.status, RunStatus::Completed);
//! assert_eq!(result.iterations, 1);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

#![warn(missing_docs)]

/// Agent loop and transcript
pub mod agent;

/// Configuration management
pub mod config;

/// Tool declarations and invocation
pub mod invoker;

/// Session logging
pub mod observability;

/// Planner/executor protocol
pub mod plan;

/// Model transport
pub mod provider;

/// Built-in tools
pub mod tools;

/// Command-line interface (enabled with the `cli` feature)
#[cfg(feature = "cli")]
pub mod cli;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::agent::{Agent, AgentState, RunResult, RunStatus, Transcript};
    pub use crate::invoker::{Outcome, ResultFormatter, ReturnConvention, Tool, ToolInvoker, ToolRegistry};
    pub use crate::plan::{PlanDriver, PlanStore, SharedPlan};
    pub use crate::provider::{GenerateConfig, GenerateResponse, LlmProvider, Message, ToolCall};
}
