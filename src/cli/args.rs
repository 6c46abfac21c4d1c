//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Tool-calling agent runner
#[derive(Parser, Debug)]
#[command(name = "tool-agent", version, about = "Run tool-calling LLM agents")]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to a .env file holding the API key
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a single agent with the file tools on a task
    Ask(AskArgs),
    /// Plan a job requirement, then execute every action item
    Plan(PlanArgs),
}

/// Arguments of `ask`
#[derive(Args, Debug, Clone)]
pub struct AskArgs {
    /// Task for the agent
    #[arg(required = true)]
    pub task: Vec<String>,

    /// Role prompt for the agent
    #[arg(long, default_value = "You are a helpful assistant with access to file tools. Reply with \"task complete\" when you are done.")]
    pub system: String,

    /// Override the configured model
    #[arg(long)]
    pub model: Option<String>,

    /// Override the configured iteration budget
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Write a JSON session log even if the config does not ask for one
    #[arg(long)]
    pub session_log: bool,
}

/// Arguments of `plan`
#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// File containing the job requirement
    #[arg(long)]
    pub job: PathBuf,

    /// File containing the user's experience data
    #[arg(long)]
    pub experience: PathBuf,

    /// File the executor appends weakness reports to
    #[arg(long, default_value = crate::tools::DEFAULT_FEEDBACK_FILE)]
    pub feedback_file: PathBuf,

    /// Give the executor the file tools as well
    #[arg(long)]
    pub with_file_tools: bool,
}
