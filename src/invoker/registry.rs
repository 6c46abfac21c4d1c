//! Insertion-ordered registry of tools.

use crate::invoker::{InvokerError, Tool, ToolContract};
use serde_json::Value;

/// The tool mapping an agent is constructed with.
///
/// Tools keep their registration order, which is also the order of the
/// derived tool menu.
///
/// # Example
///
/// ```
/// use tool_agent::invoker::{Tool, ToolRegistry};
/// use serde_json::Value;
///
/// let mut registry = ToolRegistry::new();
/// registry.register(Tool::new("ping", |_| Ok(Value::Null))).unwrap();
///
/// assert!(registry.contains("ping"));
/// assert!(registry.register(Tool::new("ping", |_| Ok(Value::Null))).is_err());
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ToolRegistry {
	tools: Vec<Tool>,
}

impl ToolRegistry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a registry from a list of tools, rejecting duplicate names.
	pub fn from_tools(tools: impl IntoIterator<Item = Tool>) -> Result<Self, InvokerError> {
		let mut registry = Self::new();
		for tool in tools {
			registry.register(tool)?;
		}
		Ok(registry)
	}

	/// Register a tool.
	///
	/// Returns an error if a tool with the same name already exists.
	pub fn register(&mut self, tool: Tool) -> Result<(), InvokerError> {
		if self.contains(tool.name()) {
			return Err(InvokerError::duplicate_name(tool.name()));
		}
		self.tools.push(tool);
		Ok(())
	}

	/// Register a tool, replacing any existing one with the same name.
	///
	/// A replaced tool keeps its position.
	pub fn register_or_replace(&mut self, tool: Tool) -> Option<Tool> {
		match self.tools.iter().position(|t| t.name() == tool.name()) {
			Some(index) => Some(std::mem::replace(&mut self.tools[index], tool)),
			None => {
				self.tools.push(tool);
				None
			}
		}
	}

	/// Look up a tool by name.
	pub fn get(&self, name: &str) -> Option<&Tool> {
		self.tools.iter().find(|t| t.name() == name)
	}

	/// Check if a tool exists.
	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Remove a tool, returning it if it existed.
	pub fn remove(&mut self, name: &str) -> Option<Tool> {
		let index = self.tools.iter().position(|t| t.name() == name)?;
		Some(self.tools.remove(index))
	}

	/// Number of registered tools.
	pub fn len(&self) -> usize {
		self.tools.len()
	}

	/// Whether no tools are registered.
	pub fn is_empty(&self) -> bool {
		self.tools.is_empty()
	}

	/// Tool names in registration order.
	pub fn names(&self) -> Vec<&str> {
		self.tools.iter().map(Tool::name).collect()
	}

	/// Iterate over tools in registration order.
	pub fn iter(&self) -> impl Iterator<Item = &Tool> {
		self.tools.iter()
	}

	/// Derive one contract per registered tool.
	pub fn contracts(&self) -> Vec<ToolContract> {
		derive_contracts(self)
	}
}

/// Derive one contract per tool in the registry.
///
/// Pure and cheap; callers re-derive before every model round-trip so the
/// menu always reflects the live registry.
pub fn derive_contracts(registry: &ToolRegistry) -> Vec<ToolContract> {
	registry.iter().map(Tool::contract).collect()
}

/// Render every contract in the chat-completions `tools` format.
///
/// # Example
///
/// ```
/// use tool_agent::invoker::{generate_openai_tools, Tool, ToolRegistry};
/// use serde_json::Value;
///
/// let registry = ToolRegistry::from_tools([
///     Tool::new("list_dir", |_| Ok(Value::Null)).param::<String>("path"),
/// ]).unwrap();
///
/// let tools = generate_openai_tools(&registry);
/// assert_eq!(tools.len(), 1);
/// assert_eq!(tools[0]["function"]["name"], "list_dir");
/// ```
pub fn generate_openai_tools(registry: &ToolRegistry) -> Vec<Value> {
	derive_contracts(registry)
		.iter()
		.map(ToolContract::to_openai_function)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn tool(name: &str) -> Tool {
		Tool::new(name, |_| Ok(Value::Null))
	}

	#[test]
	fn test_new_registry() {
		let registry = ToolRegistry::new();
		assert!(registry.is_empty());
		assert_eq!(registry.len(), 0);
		assert!(derive_contracts(&registry).is_empty());
	}

	#[test]
	fn test_register_and_get() {
		let mut registry = ToolRegistry::new();
		registry.register(tool("read_file").doc("Read")).unwrap();

		let found = registry.get("read_file").unwrap();
		assert_eq!(found.documentation(), Some("Read"));
		assert!(registry.get("write_file").is_none());
	}

	#[test]
	fn test_register_duplicate() {
		let mut registry = ToolRegistry::new();
		registry.register(tool("a")).unwrap();
		let err = registry.register(tool("a")).unwrap_err();
		assert!(matches!(err, InvokerError::DuplicateName { .. }));

		assert!(ToolRegistry::from_tools([tool("x"), tool("x")]).is_err());
	}

	#[test]
	fn test_register_or_replace_keeps_position() {
		let mut registry = ToolRegistry::from_tools([tool("a"), tool("b")]).unwrap();
		let old = registry.register_or_replace(tool("a").doc("new"));
		assert!(old.is_some());
		assert_eq!(registry.names(), vec!["a", "b"]);
		assert_eq!(registry.get("a").unwrap().documentation(), Some("new"));

		assert!(registry.register_or_replace(tool("c")).is_none());
		assert_eq!(registry.len(), 3);
	}

	#[test]
	fn test_remove() {
		let mut registry = ToolRegistry::from_tools([tool("a"), tool("b")]).unwrap();
		assert!(registry.remove("a").is_some());
		assert!(registry.remove("a").is_none());
		assert_eq!(registry.names(), vec!["b"]);
	}

	#[test]
	fn test_contracts_follow_registration_order() {
		let registry = ToolRegistry::from_tools([
			tool("zeta").doc("Last letter"),
			tool("alpha").param::<i32>("n"),
		])
		.unwrap();

		let contracts = registry.contracts();
		assert_eq!(contracts[0].name, "zeta");
		assert_eq!(contracts[1].description, "Tool: alpha");

		let tools = generate_openai_tools(&registry);
		assert_eq!(tools[1]["function"]["parameters"]["required"], json!(["n"]));
	}

	#[test]
	fn test_derivation_is_idempotent() {
		let registry = ToolRegistry::from_tools([
			tool("a").doc("A").param::<String>("s").optional_param::<f32>("f"),
			tool("b"),
		])
		.unwrap();
		assert_eq!(derive_contracts(&registry), derive_contracts(&registry));
		assert_eq!(generate_openai_tools(&registry), generate_openai_tools(&registry));
	}
}
