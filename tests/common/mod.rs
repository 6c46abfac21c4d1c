//! Scripted model for integration tests.

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tool_agent::provider::{GenerateConfig, GenerateResponse, LlmProvider, Message, ToolCall};

/// One captured model request.
#[derive(Debug, Clone)]
pub struct Request {
    pub messages: Vec<Message>,
    pub config: GenerateConfig,
}

/// Replays scripted responses in order and records every request.
///
/// Once the script runs out it answers "TASK COMPLETE".
#[derive(Clone, Default)]
pub struct MockProvider {
    responses: Arc<Mutex<Vec<Result<GenerateResponse>>>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl MockProvider {
    pub fn new(responses: Vec<Result<GenerateResponse>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Script of successful responses.
    pub fn scripted(responses: Vec<GenerateResponse>) -> Self {
        Self::new(responses.into_iter().map(Ok).collect())
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn shared(&self) -> Arc<dyn LlmProvider> {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn generate(&self, messages: &[Message], config: &GenerateConfig) -> Result<GenerateResponse> {
        self.requests.lock().unwrap().push(Request {
            messages: messages.to_vec(),
            config: config.clone(),
        });

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(GenerateResponse::text("TASK COMPLETE"))
        } else {
            responses.remove(0)
        }
    }

    fn provider_name(&self) -> &str {
        "MockProvider"
    }

    fn default_model(&self) -> String {
        "mock-model".to_string()
    }
}

/// A turn that calls one tool.
pub fn call(id: &str, name: &str, arguments: &str) -> GenerateResponse {
    GenerateResponse::with_tool_calls(vec![ToolCall::new(id, name, arguments)])
}

/// A plain-text turn.
pub fn text(content: &str) -> GenerateResponse {
    GenerateResponse::text(content)
}
