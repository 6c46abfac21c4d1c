//! Fail-closed tool invocation.

use crate::invoker::{InvokerError, Outcome, Tool, ToolArguments, ToolContract, ToolRegistry};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// Looks tools up by name and calls them, folding every fault into an
/// [`Outcome`].
///
/// # Example
///
/// ```
/// use tool_agent::invoker::{Tool, ToolArguments, ToolInvoker, ToolRegistry};
/// use serde_json::json;
///
/// let registry = ToolRegistry::from_tools([
///     Tool::new("echo", |args| Ok(args.get("text").cloned().unwrap_or_default()))
///         .param::<String>("text"),
/// ]).unwrap();
/// let invoker = ToolInvoker::new(registry);
///
/// let mut args = ToolArguments::new();
/// args.insert("text".into(), json!("hi"));
/// assert_eq!(invoker.invoke("echo", args).data(), Some(&json!("hi")));
///
/// let missing = invoker.invoke("nope", ToolArguments::new());
/// assert_eq!(missing.error(), Some("Tool 'nope' not found"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ToolInvoker {
	registry: ToolRegistry,
}

impl ToolInvoker {
	/// Create an invoker over a registry.
	pub fn new(registry: ToolRegistry) -> Self {
		Self { registry }
	}

	/// The underlying registry.
	pub fn registry(&self) -> &ToolRegistry {
		&self.registry
	}

	/// Mutable access to the registry.
	pub fn registry_mut(&mut self) -> &mut ToolRegistry {
		&mut self.registry
	}

	/// Contracts of every registered tool.
	pub fn contracts(&self) -> Vec<ToolContract> {
		self.registry.contracts()
	}

	/// Invoke `name` with `arguments`.
	///
	/// Never returns an error and never panics on behalf of a tool. Unknown
	/// names fail without calling anything.
	pub fn invoke(&self, name: &str, arguments: ToolArguments) -> Outcome {
		let Some(tool) = self.registry.get(name) else {
			warn!("Model requested unknown tool '{}'", name);
			return Outcome::from_error(&InvokerError::not_found(name), name, arguments);
		};

		if let Err(e) = check_arguments(tool, &arguments) {
			debug!("Rejected call to '{}': {}", name, e);
			return Outcome::from_error(&e, name, arguments);
		}

		let result = panic::catch_unwind(AssertUnwindSafe(|| tool.call(&arguments)));

		match result {
			Ok(Ok(value)) => Outcome::classify(tool.return_convention(), value, name, &arguments),
			Ok(Err(e)) => {
				debug!("Tool '{}' faulted: {:#}", name, e);
				Outcome::from_error(&InvokerError::fault(name, &e), name, arguments)
			}
			Err(payload) => {
				let error = InvokerError::panicked(name, panic_message(payload.as_ref()));
				warn!("{}", error);
				Outcome::from_error(&error, name, arguments)
			}
		}
	}
}

fn check_arguments(tool: &Tool, arguments: &ToolArguments) -> Result<(), InvokerError> {
	for param in tool.parameters() {
		if param.required && !arguments.contains_key(&param.name) {
			return Err(InvokerError::missing_argument(tool.name(), &param.name));
		}
	}

	for key in arguments.keys() {
		if !tool.parameters().iter().any(|p| &p.name == key) {
			return Err(InvokerError::unexpected_argument(tool.name(), key));
		}
	}

	Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(s) = payload.downcast_ref::<&str>() {
		s.to_string()
	} else if let Some(s) = payload.downcast_ref::<String>() {
		s.clone()
	} else {
		"unknown panic payload".to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::invoker::ReturnConvention;
	use serde_json::{json, Value};
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::Arc;

	fn bag(value: Value) -> ToolArguments {
		match value {
			Value::Object(map) => map,
			_ => ToolArguments::new(),
		}
	}

	#[test]
	fn test_unknown_tool_invokes_nothing() {
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = calls.clone();
		let registry = ToolRegistry::from_tools([Tool::new("real", move |_| {
			counter.fetch_add(1, Ordering::SeqCst);
			Ok(Value::Null)
		})])
		.unwrap();
		let invoker = ToolInvoker::new(registry);

		let args = bag(json!({"q": "x"}));
		let outcome = invoker.invoke("fake", args.clone());

		assert_eq!(calls.load(Ordering::SeqCst), 0);
		assert_eq!(
			outcome,
			Outcome::Failure {
				error: "Tool 'fake' not found".to_string(),
				tool_name: "fake".to_string(),
				arguments: args,
			}
		);
	}

	#[test]
	fn test_fault_becomes_failure() {
		let registry = ToolRegistry::from_tools([Tool::new("explode", |_| {
			Err(anyhow::anyhow!("disk on fire"))
		})
		.param::<i64>("n")])
		.unwrap();
		let invoker = ToolInvoker::new(registry);

		let args = bag(json!({"n": 3}));
		let outcome = invoker.invoke("explode", args.clone());
		assert_eq!(
			outcome,
			Outcome::Failure {
				error: "disk on fire".to_string(),
				tool_name: "explode".to_string(),
				arguments: args,
			}
		);
	}

	#[test]
	fn test_panic_becomes_failure() {
		let registry =
			ToolRegistry::from_tools([Tool::new("bad", |_| panic!("index out of range"))]).unwrap();
		let invoker = ToolInvoker::new(registry);

		let outcome = invoker.invoke("bad", ToolArguments::new());
		assert_eq!(
			outcome.error(),
			Some("tool 'bad' panicked: index out of range")
		);
	}

	#[test]
	fn test_argument_binding_is_checked() {
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = calls.clone();
		let registry = ToolRegistry::from_tools([Tool::new("greet", move |_| {
			counter.fetch_add(1, Ordering::SeqCst);
			Ok(json!("hello"))
		})
		.param::<String>("name")
		.optional_param::<String>("title")])
		.unwrap();
		let invoker = ToolInvoker::new(registry);

		let missing = invoker.invoke("greet", bag(json!({"title": "Dr"})));
		assert_eq!(
			missing.error(),
			Some("missing required argument 'name' for tool 'greet'")
		);

		let extra = invoker.invoke("greet", bag(json!({"name": "Ada", "age": 36})));
		assert_eq!(
			extra.error(),
			Some("unexpected argument 'age' for tool 'greet'")
		);
		assert_eq!(calls.load(Ordering::SeqCst), 0);

		assert!(invoker.invoke("greet", bag(json!({"name": "Ada"}))).is_success());
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn test_conventions_applied_per_tool() {
		let registry = ToolRegistry::from_tools([
			Tool::new("data", |_| Ok(json!("plain text"))).returns(ReturnConvention::PlainStringIsData),
			Tool::new("setter", |_| Ok(json!("value rejected")))
				.returns(ReturnConvention::OptionalStringIsError),
			Tool::new("legacy", |_| Ok(json!("plain text"))),
			Tool::new("legacy_err", |_| Ok(json!("Error: nope"))),
		])
		.unwrap();
		let invoker = ToolInvoker::new(registry);

		assert!(invoker.invoke("data", ToolArguments::new()).is_success());
		assert_eq!(
			invoker.invoke("setter", ToolArguments::new()).error(),
			Some("value rejected")
		);
		assert!(invoker.invoke("legacy", ToolArguments::new()).is_success());
		assert_eq!(
			invoker.invoke("legacy_err", ToolArguments::new()).error(),
			Some("Error: nope")
		);
	}
}
