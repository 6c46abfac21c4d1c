//! Observability for agent runs.
//!
//! Console diagnostics go through `tracing`; a [`SessionLog`] keeps a JSON
//! record of whole transcripts on disk.
//!
//! # Example
//!
//! ```no_run
//! use tool_agent::observability::SessionLog;
//! use tool_agent::provider::Message;
//! use std::path::Path;
//!
//! let log = SessionLog::create(Path::new("logs"), "gpt-4o-mini", 10).unwrap();
//! log.record(1, &[Message::user("hello")]).unwrap();
//! ```

pub mod session_log;

pub use session_log::{Interaction, SessionLog, SessionRecord};
