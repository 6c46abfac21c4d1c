//! Command implementations.

pub mod ask;
pub mod plan;

pub use ask::execute_ask;
pub use plan::execute_plan;
