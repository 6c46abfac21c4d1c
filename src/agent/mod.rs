//! Agent module: conversation state machine and transcript.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tool_agent::agent::Agent;
//! use tool_agent::invoker::{Tool, ToolRegistry};
//! use tool_agent::provider::OpenAiProvider;
//! use serde_json::json;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider = Arc::new(OpenAiProvider::new(std::env::var("OPENAI_API_KEY")?));
//! let tools = ToolRegistry::from_tools([
//!     Tool::new("get_time", |_| Ok(json!("12:00"))).doc("Current time of day."),
//! ])?;
//!
//! let mut agent = Agent::new("You are a helpful assistant.", provider)
//!     .with_model("gpt-4o-mini")
//!     .with_max_iterations(5)
//!     .with_tools(tools);
//!
//! let result = agent.run("What time is it?").await;
//! println!("{:?}: {:?}", result.status, result.result);
//! # Ok(())
//! # }
//! ```

pub mod runtime;
pub mod transcript;
pub mod types;

pub use runtime::{is_completion, Agent, COMPLETION_PHRASE, DEFAULT_MAX_ITERATIONS, MAX_ITERATIONS_MESSAGE};
pub use transcript::{Transcript, TranscriptError};
pub use types::{AgentState, RunResult, RunStatus};
