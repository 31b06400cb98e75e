use std::sync::Arc;

use async_trait::async_trait;

use crate::cli::{Command, CommandResult, SessionContext, types::CommandMetadata};

/// Print what the user currently sees
pub struct RenderCommand {
    context: Arc<SessionContext>,
}

impl RenderCommand {
    /// Creates a new RenderCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Command for RenderCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        let screen = self.context.render();
        if screen.is_empty() {
            Ok("(no player shown)".to_string())
        } else {
            Ok(screen)
        }
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "render".to_string(),
            description: "Render the visible player surface and prompt".to_string(),
            category: "ui".to_string(),
            args: vec![],
            examples: vec!["ui render".to_string()],
        }
    }
}
