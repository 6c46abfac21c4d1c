//! Provider module types

pub mod generate;
pub mod message;
pub mod tools;

pub use generate::GenerateConfig;
pub use message::{FunctionCall, Message, ToolCall};
pub use tools::ToolChoice;
