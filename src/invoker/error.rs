//! Error types for the invoker module.

use thiserror::Error;

/// Errors raised while registering or invoking tools.
///
/// Invocation errors never escape [`ToolInvoker::invoke`](crate::invoker::ToolInvoker::invoke);
/// their display text becomes the `error` of a failed [`Outcome`](crate::invoker::Outcome).
///
/// # Example
///
/// ```
/// use tool_agent::invoker::InvokerError;
///
/// let error = InvokerError::not_found("unknown_tool");
/// assert_eq!(error.to_string(), "Tool 'unknown_tool' not found");
/// ```
#[derive(Debug, Error)]
pub enum InvokerError {
	/// No tool with the requested name is registered.
	#[error("Tool '{name}' not found")]
	NotFound {
		/// Name that was requested.
		name: String,
	},

	/// A tool with the same name is already registered.
	#[error("tool already registered: {name}")]
	DuplicateName {
		/// Name of the duplicate tool.
		name: String,
	},

	/// A required parameter was not supplied.
	#[error("missing required argument '{argument}' for tool '{name}'")]
	MissingArgument {
		/// Tool being called.
		name: String,
		/// Parameter that was missing.
		argument: String,
	},

	/// An argument was supplied that the tool does not declare.
	#[error("unexpected argument '{argument}' for tool '{name}'")]
	UnexpectedArgument {
		/// Tool being called.
		name: String,
		/// Undeclared argument name.
		argument: String,
	},

	/// The handler returned an error.
	#[error("{message}")]
	Fault {
		/// Tool that faulted.
		name: String,
		/// Fault message, including any context chain.
		message: String,
	},

	/// The handler panicked.
	#[error("tool '{name}' panicked: {message}")]
	Panicked {
		/// Tool that panicked.
		name: String,
		/// Panic payload, when it was a string.
		message: String,
	},
}

impl InvokerError {
	/// Create a NotFound error for the given tool name.
	pub fn not_found(name: impl Into<String>) -> Self {
		Self::NotFound { name: name.into() }
	}

	/// Create a DuplicateName error for the given tool name.
	pub fn duplicate_name(name: impl Into<String>) -> Self {
		Self::DuplicateName { name: name.into() }
	}

	/// Create a MissingArgument error.
	pub fn missing_argument(name: impl Into<String>, argument: impl Into<String>) -> Self {
		Self::MissingArgument {
			name: name.into(),
			argument: argument.into(),
		}
	}

	/// Create an UnexpectedArgument error.
	pub fn unexpected_argument(name: impl Into<String>, argument: impl Into<String>) -> Self {
		Self::UnexpectedArgument {
			name: name.into(),
			argument: argument.into(),
		}
	}

	/// Wrap a handler error, keeping its whole context chain.
	pub fn fault(name: impl Into<String>, error: &anyhow::Error) -> Self {
		Self::Fault {
			name: name.into(),
			message: format!("{:#}", error),
		}
	}

	/// Create a Panicked error.
	pub fn panicked(name: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Panicked {
			name: name.into(),
			message: message.into(),
		}
	}

	/// True when the error is the result of an unknown tool name.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound { .. })
	}
}
