//! Planner/executor protocol.
//!
//! A planner agent fills a [`PlanStore`] through its `add_action_item` tool;
//! the [`PlanDriver`] then runs an executor agent once per item, each in a
//! fresh conversation.

pub mod driver;
pub mod prompts;
pub mod store;

pub use driver::{PlanDriver, PlanDriverConfig, PlanRunReport, StepReport};
pub use prompts::{bound_text, executor_task, planner_task, EXECUTOR_SYSTEM_PROMPT, PLANNER_SYSTEM_PROMPT};
pub use store::{add_action_item_tool, lock_plan, shared_plan, PlanStore, SharedPlan, ADD_ACTION_ITEM};
