//! Chat messages in the chat-completions wire shape.

use serde::{Deserialize, Serialize};

fn function_type() -> String {
    "function".to_string()
}

/// Function name and raw argument text of a tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the requested tool
    pub name: String,
    /// Arguments exactly as the model produced them (JSON text, possibly malformed)
    #[serde(default)]
    pub arguments: String,
}

/// A tool call requested by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Call id, echoed back in the matching tool message
    pub id: String,
    /// Always "function"
    #[serde(rename = "type", default = "function_type")]
    pub call_type: String,
    /// Requested function
    pub function: FunctionCall,
}

impl ToolCall {
    /// Create a function tool call
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            call_type: function_type(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    /// Tool name
    pub fn name(&self) -> &str {
        &self.function.name
    }

    /// Raw argument text
    pub fn arguments(&self) -> &str {
        &self.function.arguments
    }
}

/// One transcript entry.
///
/// Serializes to the chat-completions message format, e.g.
/// `{"role": "assistant", "content": null, "tool_calls": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    /// Role prompt
    System {
        /// Prompt text
        content: String,
    },
    /// Task or instruction
    User {
        /// Message text
        content: String,
    },
    /// Model turn
    Assistant {
        /// Text content; `null` when the model only called tools
        content: Option<String>,
        /// Tool calls in the order they must be dispatched
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCall>,
    },
    /// Result of one tool call
    Tool {
        /// Id of the call this answers
        tool_call_id: String,
        /// Tool that was called
        name: String,
        /// Formatted result text
        content: String,
    },
}

impl Message {
    /// System message
    pub fn system(content: impl Into<String>) -> Self {
        Message::System {
            content: content.into(),
        }
    }

    /// User message
    pub fn user(content: impl Into<String>) -> Self {
        Message::User {
            content: content.into(),
        }
    }

    /// Assistant message
    pub fn assistant(content: Option<String>, tool_calls: Vec<ToolCall>) -> Self {
        Message::Assistant { content, tool_calls }
    }

    /// Tool result message
    pub fn tool(
        tool_call_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Message::Tool {
            tool_call_id: tool_call_id.into(),
            name: name.into(),
            content: content.into(),
        }
    }

    /// Wire name of the role
    pub fn role(&self) -> &'static str {
        match self {
            Message::System { .. } => "system",
            Message::User { .. } => "user",
            Message::Assistant { .. } => "assistant",
            Message::Tool { .. } => "tool",
        }
    }

    /// Text content, if the message has any
    pub fn content(&self) -> Option<&str> {
        match self {
            Message::System { content } | Message::User { content } => Some(content.as_str()),
            Message::Assistant { content, .. } => content.as_deref(),
            Message::Tool { content, .. } => Some(content.as_str()),
        }
    }

    /// Tool calls carried by an assistant message
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Message::Assistant { tool_calls, .. } => tool_calls.as_slice(),
            _ => &[],
        }
    }
}
