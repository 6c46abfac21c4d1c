//! LLM provider abstraction module
//!
//! This module provides the provider trait the agent loop drives, the wire
//! types shared with it, and an HTTP implementation for chat-completions APIs.

pub mod traits;
pub mod types;

#[cfg(feature = "openai")]
pub mod openai;

// Re-export main types
pub use traits::{GenerateResponse, LlmProvider};
pub use types::{FunctionCall, GenerateConfig, Message, ToolCall, ToolChoice};

#[cfg(feature = "openai")]
pub use openai::OpenAiProvider;
