//! Tool invocation layer: declarations, contracts, invocation and result text.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Tool (handler + typed params + convention)   │
//! └──────────────────────┬───────────────────────┘
//!                        ▼
//! ┌──────────────────────────────────────────────┐
//! │ ToolRegistry ──► derive_contracts()          │
//! │                  to_openai_function()        │
//! └──────────────────────┬───────────────────────┘
//!                        ▼
//! ┌──────────────────────────────────────────────┐
//! │ ToolInvoker::invoke() ──► Outcome            │
//! └──────────────────────┬───────────────────────┘
//!                        ▼
//! ┌──────────────────────────────────────────────┐
//! │ ResultFormatter::format() ──► tool message   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use tool_agent::invoker::{
//!     parse_arguments, ResultFormatter, ReturnConvention, Tool, ToolInvoker, ToolRegistry,
//! };
//! use serde_json::Value;
//!
//! let registry = ToolRegistry::from_tools([
//!     Tool::new("set_email", |_| Ok(Value::Null))
//!         .doc("Set the contact email.")
//!         .param::<String>("email")
//!         .returns(ReturnConvention::OptionalStringIsError),
//! ]).unwrap();
//! let invoker = ToolInvoker::new(registry);
//!
//! let outcome = invoker.invoke("set_email", parse_arguments(r#"{"email": "a@b.c"}"#));
//! assert_eq!(
//!     ResultFormatter::format(&outcome),
//!     "Success: Operation completed successfully."
//! );
//! ```

mod args;
mod definition;
mod error;
mod format;
mod invoke;
mod outcome;
mod registry;
mod tool;

pub use args::{optional_str, parse_arguments, required_i64, required_str, required_string_list};
pub use definition::{ParamType, SchemaType, ToolContract, ToolParameter};
pub use error::InvokerError;
pub use format::ResultFormatter;
pub use invoke::ToolInvoker;
pub use outcome::Outcome;
pub use registry::{derive_contracts, generate_openai_tools, ToolRegistry};
pub use tool::{ReturnConvention, Tool, ToolArguments, ToolHandler};

/// Result type for invoker operations.
pub type InvokerResult<T> = Result<T, InvokerError>;
