use std::sync::Arc;

use async_trait::async_trait;

use crate::cli::{Command, CommandResult, SessionContext, types::CommandMetadata};

use super::{active_session, playback_report};

/// Play/pause button
pub struct ToggleCommand {
    context: Arc<SessionContext>,
}

impl ToggleCommand {
    /// Creates a new ToggleCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Command for ToggleCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        active_session(&self.context.orchestrator)?;
        self.context.orchestrator.toggle_play();
        Ok(playback_report(&self.context).await)
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "toggle".to_string(),
            description: "Toggle between playing and paused".to_string(),
            category: "player".to_string(),
            args: vec![],
            examples: vec!["toggle".to_string()],
        }
    }
}

/// Pause playback, keeping position
pub struct PauseCommand {
    context: Arc<SessionContext>,
}

impl PauseCommand {
    /// Creates a new PauseCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Command for PauseCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        active_session(&self.context.orchestrator)?;
        self.context.orchestrator.pause();
        Ok(playback_report(&self.context).await)
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "pause".to_string(),
            description: "Pause playback".to_string(),
            category: "player".to_string(),
            args: vec![],
            examples: vec!["pause".to_string()],
        }
    }
}

/// Resume playback of the current track
pub struct ResumeCommand {
    context: Arc<SessionContext>,
}

impl ResumeCommand {
    /// Creates a new ResumeCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Command for ResumeCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        active_session(&self.context.orchestrator)?;
        self.context.orchestrator.play();
        Ok(playback_report(&self.context).await)
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "resume".to_string(),
            description: "Resume playback".to_string(),
            category: "player".to_string(),
            args: vec![],
            examples: vec!["resume".to_string()],
        }
    }
}
