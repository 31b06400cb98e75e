use std::sync::Arc;

use async_trait::async_trait;

use crate::cli::{Command, CommandResult, SessionContext, types::CommandMetadata};

use super::playback_report;

/// Accept the pending track switch
pub struct ConfirmCommand {
    context: Arc<SessionContext>,
}

impl ConfirmCommand {
    /// Creates a new ConfirmCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Command for ConfirmCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        if !self.context.orchestrator.confirm_audio_change() {
            return Ok("No track change is waiting".to_string());
        }
        Ok(playback_report(&self.context).await)
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "confirm".to_string(),
            description: "Stop the current track and play the pending one".to_string(),
            category: "player".to_string(),
            args: vec![],
            examples: vec!["confirm".to_string()],
        }
    }
}

/// Dismiss the pending track switch
pub struct CancelCommand {
    context: Arc<SessionContext>,
}

impl CancelCommand {
    /// Creates a new CancelCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Command for CancelCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        if !self.context.orchestrator.cancel_audio_change() {
            return Ok("No track change is waiting".to_string());
        }
        let session = self.context.orchestrator.snapshot();
        Ok(format!("Keeping \"{}\"", session.display_title()))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "cancel".to_string(),
            description: "Keep the current track and drop the pending one".to_string(),
            category: "player".to_string(),
            args: vec![],
            examples: vec!["cancel".to_string()],
        }
    }
}
