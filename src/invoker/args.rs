//! Helpers for reading named arguments inside tool handlers.

use crate::invoker::ToolArguments;
use anyhow::{anyhow, Result};
use serde_json::Value;

/// Parse the raw argument text of a tool call.
///
/// Malformed text, or anything other than a JSON object, yields an empty
/// argument bag.
///
/// ```
/// use tool_agent::invoker::parse_arguments;
///
/// assert_eq!(parse_arguments(r#"{"path": "."}"#).len(), 1);
/// assert!(parse_arguments("{not json").is_empty());
/// assert!(parse_arguments("[1, 2]").is_empty());
/// ```
pub fn parse_arguments(raw: &str) -> ToolArguments {
	match serde_json::from_str::<Value>(raw) {
		Ok(Value::Object(map)) => map,
		Ok(_) => ToolArguments::new(),
		Err(e) => {
			tracing::debug!("Discarding malformed tool arguments: {}", e);
			ToolArguments::new()
		}
	}
}

/// Required string argument.
pub fn required_str<'a>(args: &'a ToolArguments, key: &str) -> Result<&'a str> {
	match args.get(key) {
		Some(Value::String(s)) => Ok(s.as_str()),
		Some(other) => Err(anyhow!("{} must be a string, got {}", key, other)),
		None => Err(anyhow!("missing argument '{}'", key)),
	}
}

/// Optional string argument; `null` counts as absent.
pub fn optional_str<'a>(args: &'a ToolArguments, key: &str) -> Result<Option<&'a str>> {
	match args.get(key) {
		None | Some(Value::Null) => Ok(None),
		Some(_) => required_str(args, key).map(Some),
	}
}

/// Required integer argument. Integral floats and numeric strings are accepted.
pub fn required_i64(args: &ToolArguments, key: &str) -> Result<i64> {
	let value = args
		.get(key)
		.ok_or_else(|| anyhow!("missing argument '{}'", key))?;

	match value {
		Value::Number(n) => n
			.as_i64()
			.or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
			.ok_or_else(|| anyhow!("{} must be an integer, got {}", key, n)),
		Value::String(s) => s
			.trim()
			.parse::<i64>()
			.map_err(|_| anyhow!("{} must be an integer, got \"{}\"", key, s)),
		other => Err(anyhow!("{} must be an integer, got {}", key, other)),
	}
}

/// Required list of strings. Non-string items are rendered as JSON text.
pub fn required_string_list(args: &ToolArguments, key: &str) -> Result<Vec<String>> {
	match args.get(key) {
		Some(Value::Array(items)) => Ok(items
			.iter()
			.map(|item| match item {
				Value::String(s) => s.clone(),
				other => other.to_string(),
			})
			.collect()),
		Some(other) => Err(anyhow!("{} must be a list of strings, got {}", key, other)),
		None => Err(anyhow!("missing argument '{}'", key)),
	}
}
