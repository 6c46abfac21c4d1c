//! Run states and the result handed back to callers.

use crate::provider::Message;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the conversation state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    /// Transcript seeded, nothing sent yet
    Init,
    /// About to ask the model for the next turn
    AwaitingModel,
    /// Running the tool calls of the latest turn
    DispatchingTools,
    /// The model signalled completion
    Completed,
    /// The iteration budget ran out
    MaxIterations,
    /// The model transport failed
    TransportError,
}

impl AgentState {
    /// Whether the run is over in this state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AgentState::Completed | AgentState::MaxIterations | AgentState::TransportError
        )
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AgentState::Init => "init",
            AgentState::AwaitingModel => "awaiting_model",
            AgentState::DispatchingTools => "dispatching_tools",
            AgentState::Completed => "completed",
            AgentState::MaxIterations => "max_iterations",
            AgentState::TransportError => "transport_error",
        };
        f.write_str(s)
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Completion signal received
    Completed,
    /// Iteration budget exhausted
    MaxIterationsReached,
    /// Model call failed; never retried
    TransportError,
}

impl From<RunStatus> for AgentState {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Completed => AgentState::Completed,
            RunStatus::MaxIterationsReached => AgentState::MaxIterations,
            RunStatus::TransportError => AgentState::TransportError,
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        AgentState::from(*self).fmt(f)
    }
}

/// Outcome of one `Agent::run`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Final answer; `None` after a transport error
    pub result: Option<String>,
    /// Model turns consumed
    pub iterations: usize,
    /// How the run ended
    pub status: RunStatus,
    /// Content of the final message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_message: Option<String>,
    /// Set when the iteration budget ran out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Transport fault message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Conversation as it stood when the run ended
    pub transcript: Vec<Message>,
}

impl RunResult {
    /// Whether the model signalled completion
    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }
}
