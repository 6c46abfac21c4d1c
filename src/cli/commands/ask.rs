//! `ask`: one agent, the file tools, one task.

use crate::agent::{Agent, RunResult};
use crate::cli::args::AskArgs;
use crate::cli::context::CommandContext;
use crate::provider::LlmProvider;
use crate::tools::file_tool_registry;
use std::sync::Arc;

/// Run the agent and return its result.
pub async fn execute_ask(ctx: &CommandContext, provider: Arc<dyn LlmProvider>, args: &AskArgs) -> RunResult {
    let agent_config = &ctx.config.config.agent;
    let model = args.model.clone().unwrap_or_else(|| agent_config.model.clone());
    let max_iterations = args
        .max_iterations
        .unwrap_or(agent_config.max_iterations as usize);

    let mut agent = Agent::new(args.system.clone(), provider)
        .with_name(agent_config.name.clone())
        .with_model(model.clone())
        .with_max_iterations(max_iterations)
        .with_tools(file_tool_registry());

    if let Some(log) = ctx.session_log(&model, max_iterations, args.session_log) {
        agent = agent.with_session_log(log);
    }

    agent.run(&args.task.join(" ")).await
}

/// Print a run result for a terminal.
pub fn print_result(result: &RunResult) {
    println!("Status: {} after {} iterations", result.status, result.iterations);
    if let Some(warning) = &result.warning {
        println!("Warning: {}", warning);
    }
    if let Some(error) = &result.error {
        println!("Error: {}", error);
    }
    if let Some(answer) = &result.result {
        println!("\n{}", answer);
    }
}
