//! Configuration for LLM generation requests.

use crate::provider::types::tools::ToolChoice;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configuration for a generation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Model to use (None = use provider default)
    pub model: Option<String>,
    /// Tool menu in chat-completions `tools` format
    pub tools: Option<Vec<Value>>,
    /// Tool choice strategy
    pub tool_choice: Option<ToolChoice>,
}

impl GenerateConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set tools. An empty menu clears both tools and tool choice.
    pub fn with_tools(mut self, tools: Vec<Value>) -> Self {
        if tools.is_empty() {
            self.tools = None;
            self.tool_choice = None;
        } else {
            self.tools = Some(tools);
        }
        self
    }

    /// Set tool choice
    pub fn with_tool_choice(mut self, choice: ToolChoice) -> Self {
        self.tool_choice = Some(choice);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(ref tools) = self.tools {
            for tool in tools {
                if tool.pointer("/function/name").and_then(Value::as_str).is_none() {
                    anyhow::bail!("Tool definition is missing function.name: {}", tool);
                }
            }
        }

        Ok(())
    }
}
