//! Tool choice strategy for generation requests.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool choice option for controlling LLM tool usage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    /// Let the LLM decide whether to use tools
    Auto,
}

impl ToolChoice {
    /// Convert to string representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Auto => "auto",
        }
    }

    /// Value for the `tool_choice` request field
    pub fn to_request_value(&self) -> Value {
        Value::String(self.as_str().to_string())
    }
}

impl Default for ToolChoice {
    fn default() -> Self {
        Self::Auto
    }
}
