//! The queue of action items shared by the planner tool and the driver.

use crate::invoker::{required_str, ReturnConvention, Tool};
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};

/// Name of the planner's enqueue tool.
pub const ADD_ACTION_ITEM: &str = "add_action_item";

/// Ordered action items plus the index of the next one to execute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStore {
    items: Vec<String>,
    cursor: usize,
}

impl PlanStore {
    /// Empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item; returns the new item count.
    pub fn push(&mut self, item: impl Into<String>) -> usize {
        self.items.push(item.into());
        self.items.len()
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the plan has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the next item to execute.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The item at the cursor, if any remain.
    pub fn current(&self) -> Option<&str> {
        self.items.get(self.cursor).map(String::as_str)
    }

    /// Move past the current item. Returns false if already exhausted.
    pub fn advance(&mut self) -> bool {
        if self.cursor < self.items.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Whether every item has been executed.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.items.len()
    }

    /// Drop all items and rewind.
    pub fn clear(&mut self) {
        self.items.clear();
        self.cursor = 0;
    }
}

/// A plan store handed to both the planner tool and the driving loop.
pub type SharedPlan = Arc<Mutex<PlanStore>>;

/// Create an empty shared plan.
pub fn shared_plan() -> SharedPlan {
    Arc::new(Mutex::new(PlanStore::new()))
}

/// Lock a shared plan, turning poisoning into an error.
pub fn lock_plan(plan: &SharedPlan) -> anyhow::Result<MutexGuard<'_, PlanStore>> {
    plan.lock().map_err(|_| anyhow!("plan store lock poisoned"))
}

/// The planner's `add_action_item` tool, bound to `plan`.
///
/// Returns an acknowledgement with the first 50 characters of the item and
/// the running total.
///
/// ```
/// use tool_agent::invoker::{parse_arguments, ToolInvoker, ToolRegistry};
/// use tool_agent::plan::{add_action_item_tool, shared_plan};
///
/// let plan = shared_plan();
/// let invoker = ToolInvoker::new(ToolRegistry::from_tools([add_action_item_tool(plan.clone())]).unwrap());
///
/// let outcome = invoker.invoke("add_action_item", parse_arguments(r#"{"action_item": "Fill contact info"}"#));
/// assert_eq!(
///     outcome.data().and_then(|v| v.as_str()),
///     Some("Action item added: Fill contact info... (Total: 1)")
/// );
/// assert_eq!(plan.lock().unwrap().len(), 1);
/// ```
pub fn add_action_item_tool(plan: SharedPlan) -> Tool {
    Tool::new(ADD_ACTION_ITEM, move |args| {
        let item = required_str(args, "action_item")?;
        let total = lock_plan(&plan)?.push(item);
        let preview: String = item.chars().take(50).collect();
        Ok(Value::String(format!(
            "Action item added: {}... (Total: {})",
            preview, total
        )))
    })
    .doc("Add an action item to the execution plan")
    .param::<String>("action_item")
    .returns(ReturnConvention::PlainStringIsData)
}
