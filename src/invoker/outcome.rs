//! Normalized result of a single tool invocation.

use crate::invoker::{InvokerError, ReturnConvention, ToolArguments};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Success/failure envelope produced for every tool invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
	/// The tool ran and produced `data` (`None` when it returned nothing).
	Success {
		/// Returned value.
		data: Option<Value>,
	},
	/// The tool could not be run, faulted, or reported an error.
	Failure {
		/// Human-readable error message.
		error: String,
		/// Tool that was requested.
		tool_name: String,
		/// Arguments exactly as they were supplied.
		arguments: ToolArguments,
	},
}

impl Outcome {
	/// Success without data.
	pub fn empty() -> Self {
		Outcome::Success { data: None }
	}

	/// Success carrying `data`; `null` collapses to no data.
	pub fn success(data: Value) -> Self {
		match data {
			Value::Null => Outcome::empty(),
			data => Outcome::Success { data: Some(data) },
		}
	}

	/// Failure for `tool_name`.
	pub fn failure(error: impl Into<String>, tool_name: impl Into<String>, arguments: ToolArguments) -> Self {
		Outcome::Failure {
			error: error.into(),
			tool_name: tool_name.into(),
			arguments,
		}
	}

	/// Failure built from an invoker error.
	pub fn from_error(error: &InvokerError, tool_name: impl Into<String>, arguments: ToolArguments) -> Self {
		Outcome::failure(error.to_string(), tool_name, arguments)
	}

	/// Classify a normal return value under the tool's convention.
	///
	/// ```
	/// use tool_agent::invoker::{Outcome, ReturnConvention, ToolArguments};
	/// use serde_json::json;
	///
	/// let args = ToolArguments::new();
	/// let outcome = Outcome::classify(
	///     ReturnConvention::ErrorPrefix,
	///     json!("Error: disk full"),
	///     "save",
	///     &args,
	/// );
	/// assert_eq!(outcome.error(), Some("Error: disk full"));
	///
	/// let outcome = Outcome::classify(
	///     ReturnConvention::PlainStringIsData,
	///     json!("Error: looks bad but is data"),
	///     "echo",
	///     &args,
	/// );
	/// assert!(outcome.is_success());
	/// ```
	pub fn classify(
		convention: ReturnConvention,
		value: Value,
		tool_name: &str,
		arguments: &ToolArguments,
	) -> Self {
		match convention {
			ReturnConvention::PlainStringIsData => Outcome::success(value),
			ReturnConvention::OptionalStringIsError => match value {
				Value::String(error) => Outcome::failure(error, tool_name, arguments.clone()),
				other => Outcome::success(other),
			},
			ReturnConvention::ErrorPrefix => match value {
				Value::String(error) if error.starts_with("Error:") => {
					Outcome::failure(error, tool_name, arguments.clone())
				}
				other => Outcome::success(other),
			},
		}
	}

	/// Whether the invocation succeeded.
	pub fn is_success(&self) -> bool {
		matches!(self, Outcome::Success { .. })
	}

	/// Success data, if any.
	pub fn data(&self) -> Option<&Value> {
		match self {
			Outcome::Success { data } => data.as_ref(),
			Outcome::Failure { .. } => None,
		}
	}

	/// Error message of a failure.
	pub fn error(&self) -> Option<&str> {
		match self {
			Outcome::Success { .. } => None,
			Outcome::Failure { error, .. } => Some(error.as_str()),
		}
	}
}
