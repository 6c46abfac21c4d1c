//! Append-only JSON record of agent runs.

use crate::provider::Message;
use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One recorded run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// When the run was recorded (RFC 3339, local time).
    pub timestamp: String,
    /// Model turns the run consumed.
    pub iteration_count: usize,
    /// Full transcript of the run.
    pub conversation_history: Vec<Message>,
}

/// On-disk layout of a session log file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// When the log was created.
    pub session_start: String,
    /// Model the session runs against.
    pub model: String,
    /// Iteration budget of the agent.
    pub max_iterations: usize,
    /// Recorded runs, oldest first.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    /// Timestamp of the latest append.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Session log for one agent.
///
/// Creates `agent_session_<YYYYmmdd_HHMMSS>.json` in the log directory and
/// appends one interaction per recorded run.
#[derive(Debug, Clone)]
pub struct SessionLog {
    path: PathBuf,
}

impl SessionLog {
    /// Create a new session log file in `log_dir`.
    ///
    /// # Arguments
    /// * `log_dir` - Directory for the log; created if missing.
    /// * `model` - Model identifier recorded in the header.
    /// * `max_iterations` - Iteration budget recorded in the header.
    pub fn create(log_dir: &Path, model: &str, max_iterations: usize) -> Result<Self> {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let mut path = log_dir.join(format!("agent_session_{}.json", stamp));
        let mut suffix = 1;
        while path.exists() {
            path = log_dir.join(format!("agent_session_{}_{}.json", stamp, suffix));
            suffix += 1;
        }

        Self::at_path(path, model, max_iterations)
    }

    /// Create a session log at an explicit path, overwriting any existing file.
    pub fn at_path(path: impl Into<PathBuf>, model: &str, max_iterations: usize) -> Result<Self> {
        let log = Self { path: path.into() };
        if let Some(parent) = log.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }

        let record = SessionRecord {
            session_start: Local::now().to_rfc3339(),
            model: model.to_string(),
            max_iterations,
            interactions: Vec::new(),
            last_updated: None,
        };
        log.write(&record)?;

        Ok(log)
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one interaction.
    pub fn record(&self, iteration_count: usize, conversation_history: &[Message]) -> Result<()> {
        let mut record = self.read()?;
        let now = Local::now().to_rfc3339();

        record.interactions.push(Interaction {
            timestamp: now.clone(),
            iteration_count,
            conversation_history: conversation_history.to_vec(),
        });
        record.last_updated = Some(now);

        self.write(&record)
    }

    /// Read the current contents of the log.
    pub fn read(&self) -> Result<SessionRecord> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session log: {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session log: {}", self.path.display()))
    }

    fn write(&self, record: &SessionRecord) -> Result<()> {
        let content = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write session log: {}", self.path.display()))
    }
}
