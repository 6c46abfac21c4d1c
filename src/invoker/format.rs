//! Rendering of outcomes into the text of tool messages.

use crate::invoker::Outcome;
use serde_json::Value;

/// Turns an [`Outcome`] into the content of a tool message.
///
/// # Example
///
/// ```
/// use tool_agent::invoker::{Outcome, ResultFormatter};
/// use serde_json::json;
///
/// assert_eq!(
///     ResultFormatter::format(&Outcome::empty()),
///     "Success: Operation completed successfully."
/// );
/// assert_eq!(
///     ResultFormatter::format(&Outcome::success(json!({"count": 2}))),
///     "Success: {\n  \"count\": 2\n}"
/// );
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ResultFormatter;

impl ResultFormatter {
	/// Text used for a success without data.
	pub const EMPTY_SUCCESS: &'static str = "Success: Operation completed successfully.";

	/// Render an outcome.
	pub fn format(outcome: &Outcome) -> String {
		match outcome {
			Outcome::Success { data: None } => Self::EMPTY_SUCCESS.to_string(),
			Outcome::Success { data: Some(data) } => format!("Success: {}", pretty(data)),
			Outcome::Failure {
				error,
				tool_name,
				arguments,
			} => format!(
				"Error calling {} with arguments:\n{}\n\nError: {}",
				tool_name,
				pretty(&Value::Object(arguments.clone())),
				error
			),
		}
	}

	/// Render a raw tool result that did not go through classification.
	pub fn format_raw(value: &Value) -> String {
		pretty(value)
	}
}

fn pretty(value: &Value) -> String {
	serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
