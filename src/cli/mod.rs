//! Command interpreter for the lingoplay REPL.
//!
//! Each line names a category and a command (`player seek 1:30`,
//! `device tick 5`). Commands are organized by category and help text
//! is generated from their metadata.

mod commands;
mod context;
pub mod formatting;
mod registry;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use context::SessionContext;
pub use registry::CommandRegistry;
pub use service::{CliService, LineOutcome};
pub use types::{ArgType, CliError, Command, CommandArg, CommandMetadata, CommandResult};
