//! Command-line interface.
//!
//! `main` parses [`Cli`], builds a [`CommandContext`] and hands a provider to
//! one of the [`commands`]. Commands take the provider as a parameter so they
//! can be driven by a scripted model in tests.

pub mod args;
pub mod commands;
pub mod context;
pub mod error;

pub use args::{AskArgs, Cli, Command, PlanArgs};
pub use context::CommandContext;
pub use error::{CliError, CliResult};
