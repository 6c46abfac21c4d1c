//! Ready-made tools for agents: file inspection and user feedback.

pub mod feedback;
pub mod files;

pub use feedback::{append_feedback, report_weakness_tool, DEFAULT_FEEDBACK_FILE};
pub use files::{file_tool_registry, file_tools};
