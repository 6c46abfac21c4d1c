//! LLM provider abstraction.
//!
//! The agent loop talks to the model only through [`LlmProvider`], so tests
//! can script the model and alternative transports can be swapped in.

use crate::provider::types::generate::GenerateConfig;
use crate::provider::types::message::{Message, ToolCall};
use anyhow::Result;

/// One assistant turn returned by the model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateResponse {
    /// Text content, if any
    pub content: Option<String>,
    /// Requested tool calls, in order
    pub tool_calls: Vec<ToolCall>,
}

impl GenerateResponse {
    /// A plain text answer
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
        }
    }

    /// A turn that only calls tools
    pub fn with_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: None,
            tool_calls,
        }
    }

    /// Whether the model asked for any tool
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Core trait that all LLM providers must implement
///
/// Exactly one call is made per model turn. Implementations must not retry;
/// a returned error ends the run.
///
/// # Example
///
/// ```
/// use tool_agent::provider::{GenerateConfig, GenerateResponse, LlmProvider, Message};
///
/// struct Echo;
///
/// #[async_trait::async_trait]
/// impl LlmProvider for Echo {
///     async fn generate(
///         &self,
///         messages: &[Message],
///         _config: &GenerateConfig,
///     ) -> anyhow::Result<GenerateResponse> {
///         let last = messages.last().and_then(|m| m.content()).unwrap_or_default();
///         Ok(GenerateResponse::text(format!("{} - task complete", last)))
///     }
///
///     fn provider_name(&self) -> &str {
///         "echo"
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate one assistant turn
    ///
    /// # Arguments
    /// * `messages` - Full transcript so far
    /// * `config` - Model, tool menu and tool choice
    async fn generate(&self, messages: &[Message], config: &GenerateConfig) -> Result<GenerateResponse>;

    /// Get the provider name for logging and debugging
    fn provider_name(&self) -> &str;

    /// Model used when the request does not name one
    fn default_model(&self) -> String {
        "gpt-4o-mini".to_string()
    }
}
