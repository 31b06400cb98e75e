/// Configuration inspection commands
mod schema;
mod show;

pub use schema::SchemaCommand;
pub use show::ShowCommand;

use std::sync::Arc;

use crate::cli::{CommandRegistry, SessionContext};

/// Registers all configuration commands with the command registry
pub fn register_commands(registry: &mut CommandRegistry, context: &Arc<SessionContext>) {
    const CATEGORY_NAME: &str = "config";

    registry.register_command(CATEGORY_NAME, Box::new(ShowCommand::new(context.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(SchemaCommand::new()));
}
