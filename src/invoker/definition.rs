//! Tool contracts: the schema a model sees for each registered tool.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use std::path::PathBuf;

/// Schema type of a single tool parameter.
///
/// Only the five types a function-calling model understands are modelled.
/// Anything that does not map onto one of them is described as `string`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
	/// Free text, also the fallback for untyped parameters.
	String,
	/// Whole numbers.
	Integer,
	/// Floating point numbers.
	Number,
	/// `true` / `false`.
	Boolean,
	/// Ordered sequences.
	Array,
}

impl ParamType {
	/// The JSON Schema name of this type.
	pub fn as_str(&self) -> &'static str {
		match self {
			ParamType::String => "string",
			ParamType::Integer => "integer",
			ParamType::Number => "number",
			ParamType::Boolean => "boolean",
			ParamType::Array => "array",
		}
	}
}

impl fmt::Display for ParamType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Maps a Rust type onto the schema type advertised for it.
///
/// Used by [`Tool::param`](crate::invoker::Tool::param) so the declared
/// parameter type follows the handler's own argument types.
///
/// # Example
///
/// ```
/// use tool_agent::invoker::{ParamType, SchemaType};
///
/// assert_eq!(<u32 as SchemaType>::PARAM_TYPE, ParamType::Integer);
/// assert_eq!(<Vec<String> as SchemaType>::PARAM_TYPE, ParamType::Array);
/// assert_eq!(<String as SchemaType>::PARAM_TYPE, ParamType::String);
/// ```
pub trait SchemaType {
	/// Schema type for `Self`.
	const PARAM_TYPE: ParamType;
}

macro_rules! schema_type {
	($param:expr => $($ty:ty),+ $(,)?) => {
		$(impl SchemaType for $ty {
			const PARAM_TYPE: ParamType = $param;
		})+
	};
}

schema_type!(ParamType::Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
schema_type!(ParamType::Number => f32, f64);
schema_type!(ParamType::Boolean => bool);
schema_type!(ParamType::String => String, str, char, PathBuf, Value);

impl<T: SchemaType + ?Sized> SchemaType for &T {
	const PARAM_TYPE: ParamType = T::PARAM_TYPE;
}

impl<T> SchemaType for Vec<T> {
	const PARAM_TYPE: ParamType = ParamType::Array;
}

impl<T> SchemaType for [T] {
	const PARAM_TYPE: ParamType = ParamType::Array;
}

/// One named parameter in a tool contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolParameter {
	/// Argument name the model must use.
	pub name: String,
	/// Advertised schema type.
	#[serde(rename = "type")]
	pub param_type: ParamType,
	/// Parameters without a default are required.
	pub required: bool,
}

impl ToolParameter {
	/// Create a parameter description.
	pub fn new(name: impl Into<String>, param_type: ParamType, required: bool) -> Self {
		Self {
			name: name.into(),
			param_type,
			required,
		}
	}
}

/// The invocation contract of a tool as advertised to the model.
///
/// Contracts are derived from the live registry before every model
/// round-trip and are never mutated afterwards.
///
/// # Example
///
/// ```
/// use tool_agent::invoker::{ParamType, ToolContract, ToolParameter};
///
/// let contract = ToolContract {
///     name: "read_file_lines".to_string(),
///     description: "Read a range of lines".to_string(),
///     parameters: vec![
///         ToolParameter::new("filepath", ParamType::String, true),
///         ToolParameter::new("start_line", ParamType::Integer, true),
///     ],
/// };
///
/// let schema = contract.to_openai_function();
/// assert_eq!(schema["type"], "function");
/// assert_eq!(schema["function"]["parameters"]["properties"]["start_line"]["type"], "integer");
/// assert_eq!(schema["function"]["parameters"]["required"][0], "filepath");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolContract {
	/// Unique tool name.
	pub name: String,
	/// Documentation shown to the model.
	pub description: String,
	/// Parameters in declaration order.
	pub parameters: Vec<ToolParameter>,
}

impl ToolContract {
	/// Names of the required parameters, in declaration order.
	pub fn required(&self) -> Vec<&str> {
		self.parameters
			.iter()
			.filter(|p| p.required)
			.map(|p| p.name.as_str())
			.collect()
	}

	/// Whether a parameter with the given name is declared.
	pub fn declares(&self, name: &str) -> bool {
		self.parameters.iter().any(|p| p.name == name)
	}

	/// Render the contract in the chat-completions `tools` format.
	pub fn to_openai_function(&self) -> Value {
		let mut properties = Map::new();
		for param in &self.parameters {
			properties.insert(
				param.name.clone(),
				json!({
					"type": param.param_type.as_str(),
					"description": format!("Parameter {}", param.name),
				}),
			);
		}

		json!({
			"type": "function",
			"function": {
				"name": self.name,
				"description": self.description,
				"parameters": {
					"type": "object",
					"properties": properties,
					"required": self.required(),
				}
			}
		})
	}
}
