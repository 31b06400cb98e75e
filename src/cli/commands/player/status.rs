use std::sync::Arc;

use async_trait::async_trait;

use crate::cli::{
    Command, CommandResult, SessionContext, formatting::format_session, types::CommandMetadata,
};

/// Print the current session
pub struct StatusCommand {
    context: Arc<SessionContext>,
}

impl StatusCommand {
    /// Creates a new StatusCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Command for StatusCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        let session = self.context.orchestrator.snapshot();
        Ok(format!(
            "{}\nroute: {}",
            format_session(&session),
            self.context.route()
        ))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "status".to_string(),
            description: "Show the playback session".to_string(),
            category: "player".to_string(),
            args: vec![],
            examples: vec!["status".to_string()],
        }
    }
}
