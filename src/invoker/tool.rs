//! Tool declarations: a handler plus the explicit contract it is called under.

use crate::invoker::{ParamType, SchemaType, ToolContract, ToolParameter};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Named arguments handed to a tool, keyed by parameter name.
pub type ToolArguments = Map<String, Value>;

/// Callable behind a tool.
///
/// Handlers receive the parsed argument bag and return a JSON value, `null`
/// when there is nothing to report. An `Err` is a tool fault.
pub type ToolHandler = Arc<dyn Fn(&ToolArguments) -> anyhow::Result<Value> + Send + Sync>;

/// How a tool's normal return value is classified into an outcome.
///
/// Chosen once at registration time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnConvention {
	/// The tool always returns data. Every value, strings included, is a success.
	PlainStringIsData,
	/// `null` means success, a returned string is an error message.
	OptionalStringIsError,
	/// `null` means success, a string starting with `"Error:"` is an error
	/// message, every other value is success data.
	#[default]
	ErrorPrefix,
}

/// A registered tool.
///
/// # Example
///
/// ```
/// use tool_agent::invoker::{ReturnConvention, Tool};
/// use serde_json::json;
///
/// let tool = Tool::new("add", |args| {
///     let a = args.get("a").and_then(|v| v.as_i64()).unwrap_or(0);
///     let b = args.get("b").and_then(|v| v.as_i64()).unwrap_or(0);
///     Ok(json!(a + b))
/// })
/// .doc("Add two integers.")
/// .param::<i64>("a")
/// .optional_param::<i64>("b");
///
/// let contract = tool.contract();
/// assert_eq!(contract.description, "Add two integers.");
/// assert_eq!(contract.required(), vec!["a"]);
/// assert_eq!(tool.return_convention(), ReturnConvention::ErrorPrefix);
/// ```
#[derive(Clone)]
pub struct Tool {
	name: String,
	doc: Option<String>,
	parameters: Vec<ToolParameter>,
	returns: ReturnConvention,
	handler: ToolHandler,
}

impl Tool {
	/// Create a tool with no parameters, no documentation and the default
	/// return convention.
	pub fn new<F>(name: impl Into<String>, handler: F) -> Self
	where
		F: Fn(&ToolArguments) -> anyhow::Result<Value> + Send + Sync + 'static,
	{
		Self {
			name: name.into(),
			doc: None,
			parameters: Vec::new(),
			returns: ReturnConvention::default(),
			handler: Arc::new(handler),
		}
	}

	/// Attach documentation. It becomes the contract description.
	pub fn doc(mut self, doc: impl Into<String>) -> Self {
		self.doc = Some(doc.into());
		self
	}

	/// Declare a required parameter typed after `T`.
	pub fn param<T: SchemaType + ?Sized>(self, name: impl Into<String>) -> Self {
		self.with_parameter(name, T::PARAM_TYPE, true)
	}

	/// Declare a parameter that has a default and may be omitted.
	pub fn optional_param<T: SchemaType + ?Sized>(self, name: impl Into<String>) -> Self {
		self.with_parameter(name, T::PARAM_TYPE, false)
	}

	/// Declare a required parameter without a type; advertised as a string.
	pub fn untyped_param(self, name: impl Into<String>) -> Self {
		self.with_parameter(name, ParamType::String, true)
	}

	/// Choose how return values are classified.
	pub fn returns(mut self, convention: ReturnConvention) -> Self {
		self.returns = convention;
		self
	}

	fn with_parameter(mut self, name: impl Into<String>, param_type: ParamType, required: bool) -> Self {
		let name = name.into();
		self.parameters.retain(|p| p.name != name);
		self.parameters.push(ToolParameter::new(name, param_type, required));
		self
	}

	/// Tool name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Raw documentation, if any was attached.
	pub fn documentation(&self) -> Option<&str> {
		self.doc.as_deref()
	}

	/// Declared parameters in order.
	pub fn parameters(&self) -> &[ToolParameter] {
		&self.parameters
	}

	/// Return classification for this tool.
	pub fn return_convention(&self) -> ReturnConvention {
		self.returns
	}

	/// Derive the contract advertised to the model.
	///
	/// The description is the trimmed documentation, or `"Tool: <name>"`
	/// when there is none.
	pub fn contract(&self) -> ToolContract {
		let description = self
			.doc
			.as_deref()
			.map(str::trim)
			.filter(|doc| !doc.is_empty())
			.map(str::to_string)
			.unwrap_or_else(|| format!("Tool: {}", self.name));

		ToolContract {
			name: self.name.clone(),
			description,
			parameters: self.parameters.clone(),
		}
	}

	pub(crate) fn call(&self, arguments: &ToolArguments) -> anyhow::Result<Value> {
		(self.handler)(arguments)
	}
}

impl fmt::Debug for Tool {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Tool")
			.field("name", &self.name)
			.field("parameters", &self.parameters)
			.field("returns", &self.returns)
			.finish_non_exhaustive()
	}
}
