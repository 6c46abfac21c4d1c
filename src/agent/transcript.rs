//! Ordered conversation record with role-sequence checks.

use crate::provider::{Message, ToolCall};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Violations of the transcript's message ordering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptError {
    /// A tool message was pushed with no assistant turn to answer.
    #[error("tool message has no preceding assistant message")]
    NoPendingCalls,

    /// A tool message references a call id the preceding assistant turn did not emit.
    #[error("tool message answers unknown call id '{0}'")]
    UnknownCallId(String),
}

/// The conversation an agent runs against.
///
/// Always starts with one system message followed by one user message, then
/// alternates assistant turns with the tool messages answering them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Empty transcript, as left behind by a reset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial transcript: role prompt then task.
    pub fn start(system_prompt: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt), Message::user(task)],
        }
    }

    /// Append a model turn.
    pub fn push_assistant(&mut self, content: Option<String>, tool_calls: Vec<ToolCall>) {
        self.messages.push(Message::assistant(content, tool_calls));
    }

    /// Append the result of one tool call.
    ///
    /// `tool_call_id` must be one of the calls of the most recent assistant
    /// message, with only tool messages in between.
    pub fn push_tool(
        &mut self,
        tool_call_id: &str,
        name: &str,
        content: impl Into<String>,
    ) -> Result<(), TranscriptError> {
        let pending = self
            .messages
            .iter()
            .rev()
            .find(|m| !matches!(m, Message::Tool { .. }))
            .filter(|m| matches!(m, Message::Assistant { .. }))
            .ok_or(TranscriptError::NoPendingCalls)?;

        if !pending.tool_calls().iter().any(|c| c.id == tool_call_id) {
            return Err(TranscriptError::UnknownCallId(tool_call_id.to_string()));
        }

        self.messages.push(Message::tool(tool_call_id, name, content));
        Ok(())
    }

    /// All messages in order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Content of the last message, if it has any.
    pub fn last_content(&self) -> Option<&str> {
        self.messages.last().and_then(Message::content)
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drop every message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Take the messages out.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    /// Plain-text rendering: one `[role]: content` line per message with
    /// content, and one `[tool_calls]: ...` line per assistant turn that
    /// called tools.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for message in &self.messages {
            if let Some(content) = message.content().filter(|c| !c.is_empty()) {
                out.push_str(&format!("[{}]: {}\n", message.role(), content));
            }
            let calls = message.tool_calls();
            if !calls.is_empty() {
                let calls = serde_json::to_string(calls).unwrap_or_default();
                out.push_str(&format!("[tool_calls]: {}\n", calls));
            }
        }
        out
    }
}
