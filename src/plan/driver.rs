//! Planner-then-executor driving loop.

use crate::agent::{Agent, RunResult};
use crate::config::ConfigurationLoader;
use crate::invoker::ToolRegistry;
use crate::plan::prompts::{bound_text, executor_task, planner_task, EXECUTOR_SYSTEM_PROMPT, PLANNER_SYSTEM_PROMPT};
use crate::plan::store::{add_action_item_tool, lock_plan, shared_plan, SharedPlan};
use crate::provider::LlmProvider;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Settings for a planner/executor pair.
#[derive(Debug, Clone)]
pub struct PlanDriverConfig {
    /// Model for the planner
    pub planner_model: String,
    /// Model for the executor
    pub executor_model: String,
    /// Planner iteration budget
    pub planner_max_iterations: usize,
    /// Executor iteration budget per item
    pub executor_max_iterations: usize,
    /// Characters of collaborator data embedded per executor prompt
    pub experience_char_limit: usize,
    /// Planner role prompt
    pub planner_prompt: String,
    /// Executor role prompt
    pub executor_prompt: String,
}

impl Default for PlanDriverConfig {
    fn default() -> Self {
        Self {
            planner_model: "gpt-4o-mini".to_string(),
            executor_model: "gpt-4o-mini".to_string(),
            planner_max_iterations: 5,
            executor_max_iterations: 10,
            experience_char_limit: 12_000,
            planner_prompt: PLANNER_SYSTEM_PROMPT.to_string(),
            executor_prompt: EXECUTOR_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl PlanDriverConfig {
    /// Settings taken from the `[planner]` and `[executor]` sections.
    pub fn from_loader(loader: &ConfigurationLoader) -> Self {
        let config = &loader.config;
        Self {
            planner_model: loader.planner_model(),
            executor_model: loader.executor_model(),
            planner_max_iterations: config.planner.max_iterations as usize,
            executor_max_iterations: config.executor.max_iterations as usize,
            experience_char_limit: config.executor.experience_char_limit,
            ..Self::default()
        }
    }
}

/// What one executor run did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    /// Position of the item in the plan
    pub index: usize,
    /// The action item
    pub instruction: String,
    /// Executor run result
    pub result: RunResult,
    /// Executor transcript rendered as text
    pub feedback: String,
}

/// Result of a whole planner/executor run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRunReport {
    /// Planner run result
    pub planner: RunResult,
    /// Plan as the planner left it
    pub items: Vec<String>,
    /// One report per executed item, in plan order
    pub steps: Vec<StepReport>,
}

/// Runs the planner once, then the executor once per planned item.
///
/// The executor sees only the bounded collaborator data and its current
/// item; its transcript is harvested and reset between items.
pub struct PlanDriver {
    planner: Agent,
    executor: Agent,
    plan: SharedPlan,
    experience_char_limit: Option<usize>,
}

impl PlanDriver {
    /// Drive existing agents. `planner` must carry an
    /// [`add_action_item_tool`] bound to `plan`.
    pub fn new(planner: Agent, executor: Agent, plan: SharedPlan) -> Self {
        Self {
            planner,
            executor,
            plan,
            experience_char_limit: None,
        }
    }

    /// Build both agents over one provider.
    ///
    /// The planner gets only the `add_action_item` tool; the executor gets
    /// `executor_tools`.
    pub fn build(
        provider: Arc<dyn LlmProvider>,
        config: &PlanDriverConfig,
        executor_tools: ToolRegistry,
    ) -> Result<Self> {
        let plan = shared_plan();

        let planner = Agent::new(config.planner_prompt.clone(), provider.clone())
            .with_name("planner")
            .with_model(config.planner_model.clone())
            .with_max_iterations(config.planner_max_iterations)
            .with_tool(add_action_item_tool(plan.clone()))?;

        let executor = Agent::new(config.executor_prompt.clone(), provider)
            .with_name("executor")
            .with_model(config.executor_model.clone())
            .with_max_iterations(config.executor_max_iterations)
            .with_tools(executor_tools);

        Ok(Self::new(planner, executor, plan).with_experience_char_limit(config.experience_char_limit))
    }

    /// Bound the collaborator data embedded in each executor prompt.
    pub fn with_experience_char_limit(mut self, limit: usize) -> Self {
        self.experience_char_limit = Some(limit);
        self
    }

    /// The shared plan.
    pub fn plan(&self) -> &SharedPlan {
        &self.plan
    }

    /// The planner agent.
    pub fn planner(&self) -> &Agent {
        &self.planner
    }

    /// The executor agent.
    pub fn executor(&self) -> &Agent {
        &self.executor
    }

    /// Plan for `job_requirement`, then execute every item against `experience`.
    pub async fn run(&mut self, job_requirement: &str, experience: &str) -> Result<PlanRunReport> {
        lock_plan(&self.plan)?.clear();

        let planner = self.planner.run(&planner_task(job_requirement)).await;
        let items = lock_plan(&self.plan)?.items().to_vec();
        info!(
            "Planner finished ({}) with {} action items",
            planner.status,
            items.len()
        );

        let experience = match self.experience_char_limit {
            Some(limit) => bound_text(experience, limit),
            None => experience,
        };

        let mut steps = Vec::new();
        loop {
            let (index, instruction) = {
                let store = lock_plan(&self.plan)?;
                match store.current() {
                    Some(item) => (store.cursor(), item.to_string()),
                    None => break,
                }
            };

            info!("Executing action item {}/{}", index + 1, items.len());
            let result = self.executor.run(&executor_task(experience, &instruction)).await;
            let feedback = self.executor.transcript().render();

            steps.push(StepReport {
                index,
                instruction,
                result,
                feedback,
            });

            lock_plan(&self.plan)?.advance();
            self.executor.reset();
        }

        Ok(PlanRunReport {
            planner,
            items,
            steps,
        })
    }
}
