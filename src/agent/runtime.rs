//! The tool-calling conversation loop.

use crate::agent::transcript::Transcript;
use crate::agent::types::{AgentState, RunResult, RunStatus};
use crate::invoker::{parse_arguments, ResultFormatter, Tool, ToolInvoker, ToolRegistry};
use crate::observability::SessionLog;
use crate::provider::{GenerateConfig, GenerateResponse, LlmProvider, ToolCall, ToolChoice};
use anyhow::Result;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Phrase that ends a run when it appears in a plain-text answer (any case).
pub const COMPLETION_PHRASE: &str = "task complete";

/// Result text and warning used when the budget runs out.
pub const MAX_ITERATIONS_MESSAGE: &str = "Max iterations reached";

/// Default iteration budget.
pub const DEFAULT_MAX_ITERATIONS: usize = 20;

/// An agent: a role prompt, a tool mapping and a model, driven by [`Agent::run`].
///
/// Each run alternates model turns and tool dispatch until the model answers
/// in plain text containing "task complete", answers in plain text on any
/// turn after the first, or the iteration budget runs out.
pub struct Agent {
    name: String,
    system_prompt: String,
    model: String,
    max_iterations: usize,
    invoker: ToolInvoker,
    provider: Arc<dyn LlmProvider>,
    transcript: Transcript,
    iteration: usize,
    state: AgentState,
    session_log: Option<SessionLog>,
}

impl Agent {
    /// Create an agent with no tools, the provider's default model and the
    /// default budget.
    pub fn new(system_prompt: impl Into<String>, provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            name: "agent".to_string(),
            system_prompt: system_prompt.into(),
            model: provider.default_model(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            invoker: ToolInvoker::default(),
            provider,
            transcript: Transcript::new(),
            iteration: 0,
            state: AgentState::Init,
            session_log: None,
        }
    }

    /// Name used in log lines.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Model identifier sent with every request.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Replace the tool mapping.
    pub fn with_tools(mut self, tools: ToolRegistry) -> Self {
        self.invoker = ToolInvoker::new(tools);
        self
    }

    /// Add one tool. Fails if the name is taken.
    pub fn with_tool(mut self, tool: Tool) -> Result<Self> {
        self.invoker.registry_mut().register(tool)?;
        Ok(self)
    }

    /// Record every finished run in `log`.
    pub fn with_session_log(mut self, log: SessionLog) -> Self {
        self.session_log = Some(log);
        self
    }

    /// Agent name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Role prompt.
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Iteration budget.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// The tool mapping.
    pub fn tools(&self) -> &ToolRegistry {
        self.invoker.registry()
    }

    /// Transcript of the current or last run.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Model turns used by the current or last run.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Current state of the conversation state machine.
    pub fn state(&self) -> AgentState {
        self.state
    }

    /// Session log, if one is attached.
    pub fn session_log(&self) -> Option<&SessionLog> {
        self.session_log.as_ref()
    }

    /// Forget the previous conversation.
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.iteration = 0;
        self.state = AgentState::Init;
    }

    /// Append the current transcript to the session log.
    ///
    /// Does nothing when no log is attached.
    pub fn save_log(&self) -> Result<()> {
        match &self.session_log {
            Some(log) => log.record(self.iteration, self.transcript.messages()),
            None => Ok(()),
        }
    }

    /// Run `task` to a terminal state.
    ///
    /// Never fails: transport errors and budget exhaustion are reported in the
    /// returned [`RunResult`].
    pub async fn run(&mut self, task: &str) -> RunResult {
        self.transcript = Transcript::start(self.system_prompt.clone(), task);
        self.iteration = 0;
        self.state = AgentState::Init;

        info!(
            "{}: starting run (model {}, provider {}, budget {})",
            self.name,
            self.model,
            self.provider.provider_name(),
            self.max_iterations
        );

        loop {
            self.state = AgentState::AwaitingModel;

            if self.iteration >= self.max_iterations {
                warn!("{}: {} after {} iterations", self.name, MAX_ITERATIONS_MESSAGE, self.iteration);
                let last = self
                    .transcript
                    .last_content()
                    .filter(|c| !c.is_empty())
                    .unwrap_or(MAX_ITERATIONS_MESSAGE)
                    .to_string();
                return self.finish(RunStatus::MaxIterationsReached, Some(last), None);
            }
            self.iteration += 1;

            let config = self.request_config();
            debug!(
                "{}: iteration {} with {} messages, {} tools",
                self.name,
                self.iteration,
                self.transcript.len(),
                self.tools().len()
            );

            let response = match self.provider.generate(self.transcript.messages(), &config).await {
                Ok(response) => response,
                Err(e) => {
                    error!("{}: model call failed at iteration {}: {:#}", self.name, self.iteration, e);
                    return self.finish(RunStatus::TransportError, None, Some(format!("{:#}", e)));
                }
            };

            let GenerateResponse { content, tool_calls } = response;
            self.transcript.push_assistant(content.clone(), tool_calls.clone());

            if !tool_calls.is_empty() {
                self.dispatch(&tool_calls);
                continue;
            }

            let Some(content) = content.filter(|c| !c.is_empty()) else {
                debug!("{}: iteration {} produced neither content nor tool calls", self.name, self.iteration);
                continue;
            };

            if is_completion(&content, self.iteration) {
                info!("{}: completed after {} iterations", self.name, self.iteration);
                return self.finish(RunStatus::Completed, Some(content), None);
            }
        }
    }

    fn request_config(&self) -> GenerateConfig {
        let config = GenerateConfig::new().with_model(self.model.clone());
        if self.tools().is_empty() {
            return config;
        }
        let menu = self
            .invoker
            .contracts()
            .iter()
            .map(|c| c.to_openai_function())
            .collect();
        config.with_tools(menu).with_tool_choice(ToolChoice::Auto)
    }

    fn dispatch(&mut self, tool_calls: &[ToolCall]) {
        self.state = AgentState::DispatchingTools;
        let names: Vec<&str> = tool_calls.iter().map(ToolCall::name).collect();
        info!(
            "{}: iteration {} executing {} tools: [{}]",
            self.name,
            self.iteration,
            tool_calls.len(),
            names.join(", ")
        );

        for call in tool_calls {
            let arguments = parse_arguments(call.arguments());
            let outcome = self.invoker.invoke(call.name(), arguments);
            if let Some(error) = outcome.error() {
                debug!("{}: tool {} failed: {}", self.name, call.name(), error);
            }

            let content = ResultFormatter::format(&outcome);
            if let Err(e) = self.transcript.push_tool(&call.id, call.name(), content) {
                error!("{}: dropped result of {}: {}", self.name, call.name(), e);
            }
        }
    }

    fn finish(&mut self, status: RunStatus, result: Option<String>, error: Option<String>) -> RunResult {
        self.state = status.into();

        if let Err(e) = self.save_log() {
            warn!("{}: failed to write session log: {:#}", self.name, e);
        }

        let warning = match status {
            RunStatus::MaxIterationsReached => Some(MAX_ITERATIONS_MESSAGE.to_string()),
            _ => None,
        };

        RunResult {
            final_message: result.clone(),
            result,
            iterations: self.iteration,
            status,
            warning,
            error,
            transcript: self.transcript.messages().to_vec(),
        }
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("provider", &self.provider.provider_name())
            .field("max_iterations", &self.max_iterations)
            .field("tools", &self.tools().names())
            .field("iteration", &self.iteration)
            .field("state", &self.state)
            .finish()
    }
}

/// Plain-text completion rule: the phrase anywhere (any case), or any
/// plain-text answer after the first turn.
pub fn is_completion(content: &str, iteration: usize) -> bool {
    content.to_lowercase().contains(COMPLETION_PHRASE) || iteration >= 2
}
