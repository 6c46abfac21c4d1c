//! Chat-completions transport over HTTP.

use crate::config::{ConfigurationLoader, EnvironmentLoader};
use crate::provider::traits::{GenerateResponse, LlmProvider};
use crate::provider::types::{GenerateConfig, Message, ToolCall};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default endpoint path relative to the base URL
pub const DEFAULT_ENDPOINT: &str = "chat/completions";

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

/// Provider for OpenAI-compatible chat-completions APIs
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    endpoint: String,
    default_model: String,
}

impl OpenAiProvider {
    /// Create a provider for the public API
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            default_model: "gpt-4o-mini".to_string(),
        }
    }

    /// Build a provider from loaded configuration and environment.
    ///
    /// The API key is read from the variable named by `llm.api_key_env`.
    /// `OPENAI_BASE_URL` overrides the configured base URL.
    pub fn from_config(config: &ConfigurationLoader, env: &EnvironmentLoader) -> Result<Self> {
        let llm = &config.config.llm;
        let api_key = env.api_key(&llm.api_key_env).with_context(|| {
            format!("API key not found in environment variable {}", llm.api_key_env)
        })?;

        let base_url = env.base_url_override().unwrap_or_else(|| llm.base_url.clone());

        Ok(Self::new(api_key)
            .with_base_url(base_url)
            .with_endpoint(llm.endpoint.clone())
            .with_default_model(config.config.agent.model.clone()))
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the endpoint path
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the model used when a request names none
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Full request URL
    pub fn request_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }

    /// Build the JSON request body.
    ///
    /// `tools` and `tool_choice` are omitted when the menu is empty.
    pub fn build_request_body(&self, messages: &[Message], config: &GenerateConfig) -> Value {
        let model = config
            .model
            .clone()
            .unwrap_or_else(|| self.default_model.clone());

        let mut body = json!({
            "model": model,
            "messages": messages,
        });

        if let Some(tools) = config.tools.as_ref().filter(|t| !t.is_empty()) {
            body["tools"] = Value::Array(tools.clone());
            if let Some(choice) = &config.tool_choice {
                body["tool_choice"] = choice.to_request_value();
            }
        }

        body
    }

    /// Parse a chat-completions response body into one assistant turn.
    pub fn parse_response(body: &str) -> Result<GenerateResponse> {
        let completion: ChatCompletion =
            serde_json::from_str(body).context("Failed to parse chat completion response")?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .context("Chat completion response contained no choices")?;

        Ok(GenerateResponse {
            content: choice.message.content,
            tool_calls: choice.message.tool_calls.unwrap_or_default(),
        })
    }
}

#[async_trait::async_trait]
impl LlmProvider for OpenAiProvider {
    async fn generate(&self, messages: &[Message], config: &GenerateConfig) -> Result<GenerateResponse> {
        config.validate()?;

        let url = self.request_url();
        let body = self.build_request_body(messages, config);
        debug!("POST {} with {} messages", url, messages.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send HTTP request")?;

        let status = response.status();
        let response_body = response.text().await?;

        if !status.is_success() {
            anyhow::bail!("API error {}: {}", status, response_body);
        }

        Self::parse_response(&response_body)
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn default_model(&self) -> String {
        self.default_model.clone()
    }
}
