/// Commands that act as the host page
mod render;
mod route;

pub use render::RenderCommand;
pub use route::RouteCommand;

use std::sync::Arc;

use crate::cli::{CommandRegistry, SessionContext};

/// Registers all ui commands with the command registry
pub fn register_commands(registry: &mut CommandRegistry, context: &Arc<SessionContext>) {
    const CATEGORY_NAME: &str = "ui";

    registry.register_command(CATEGORY_NAME, Box::new(RouteCommand::new(context.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(RenderCommand::new(context.clone())));
}
