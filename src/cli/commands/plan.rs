//! `plan`: planner fills the plan, executor runs each item.

use crate::cli::args::PlanArgs;
use crate::cli::context::CommandContext;
use crate::cli::error::{CliError, CliResult};
use crate::invoker::ToolRegistry;
use crate::plan::{PlanDriver, PlanDriverConfig, PlanRunReport};
use crate::provider::LlmProvider;
use crate::tools::{file_tools, report_weakness_tool};
use std::fs;
use std::sync::Arc;

/// Read the inputs, run the pipeline and return its report.
pub async fn execute_plan(
    ctx: &CommandContext,
    provider: Arc<dyn LlmProvider>,
    args: &PlanArgs,
) -> CliResult<PlanRunReport> {
    let job = fs::read_to_string(&args.job)?;
    let experience = fs::read_to_string(&args.experience)?;

    let mut tools = vec![report_weakness_tool(&args.feedback_file)];
    if args.with_file_tools {
        tools.extend(file_tools());
    }
    let executor_tools = ToolRegistry::from_tools(tools)
        .map_err(|e| CliError::ExecutionError(e.to_string()))?;

    let config = PlanDriverConfig::from_loader(&ctx.config);
    let mut driver = PlanDriver::build(provider, &config, executor_tools).map_err(CliError::execution)?;

    driver.run(&job, &experience).await.map_err(CliError::execution)
}

/// Print the plan and each step's outcome.
pub fn print_report(report: &PlanRunReport) {
    println!("Planner: {} after {} iterations", report.planner.status, report.planner.iterations);
    println!("Plan ({} items):", report.items.len());
    for item in &report.items {
        println!("- {}", item);
    }

    for step in &report.steps {
        println!(
            "\n[{}/{}] {} ({} iterations)",
            step.index + 1,
            report.items.len(),
            step.result.status,
            step.result.iterations
        );
        println!("{}", step.instruction);
        if let Some(answer) = &step.result.result {
            println!("=> {}", answer);
        }
        if let Some(error) = &step.result.error {
            println!("=> error: {}", error);
        }
    }
}
