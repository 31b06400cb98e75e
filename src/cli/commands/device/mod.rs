/// Commands that drive the simulated device
mod simulate;

pub use simulate::{EndCommand, FailCommand, RejectCommand, TickCommand};

use std::sync::Arc;

use crate::cli::{CommandRegistry, SessionContext};

/// Registers all device commands with the command registry
///
/// These stand in for what a real output device would report on its own.
pub fn register_commands(registry: &mut CommandRegistry, context: &Arc<SessionContext>) {
    const CATEGORY_NAME: &str = "device";

    registry.register_command(CATEGORY_NAME, Box::new(TickCommand::new(context.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(EndCommand::new(context.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(RejectCommand::new(context.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(FailCommand::new(context.clone())));
}
