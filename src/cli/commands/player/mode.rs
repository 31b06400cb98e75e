use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{Command, CommandResult, SessionContext, types::CommandMetadata},
    services::playback::PlayerMode,
};

use super::active_session;

fn describe(mode: PlayerMode) -> String {
    format!("Player is {mode}")
}

/// Grow the player one step
pub struct ExpandCommand {
    context: Arc<SessionContext>,
}

impl ExpandCommand {
    /// Creates a new ExpandCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Command for ExpandCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        active_session(&self.context.orchestrator)?;
        Ok(describe(self.context.orchestrator.expand()))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "expand".to_string(),
            description: "Minimized to compact, compact to full".to_string(),
            category: "player".to_string(),
            args: vec![],
            examples: vec!["expand".to_string()],
        }
    }
}

/// Shrink the player one step
pub struct MinimizeCommand {
    context: Arc<SessionContext>,
}

impl MinimizeCommand {
    /// Creates a new MinimizeCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Command for MinimizeCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        active_session(&self.context.orchestrator)?;
        Ok(describe(self.context.orchestrator.minimize()))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "minimize".to_string(),
            description: "Full to compact, compact to minimized".to_string(),
            category: "player".to_string(),
            args: vec![],
            examples: vec!["minimize".to_string()],
        }
    }
}

/// Close button: ends the session
pub struct CloseCommand {
    context: Arc<SessionContext>,
}

impl CloseCommand {
    /// Creates a new CloseCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Command for CloseCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        self.context.orchestrator.close();
        Ok(describe(PlayerMode::Closed))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "close".to_string(),
            description: "Stop playback and close the player".to_string(),
            category: "player".to_string(),
            args: vec![],
            examples: vec!["close".to_string()],
        }
    }
}
