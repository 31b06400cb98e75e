use std::sync::Arc;

use async_trait::async_trait;

use crate::cli::{CliError, Command, CommandResult, SessionContext, types::CommandMetadata};

/// Print the configuration in effect
pub struct ShowCommand {
    context: Arc<SessionContext>,
}

impl ShowCommand {
    /// Creates a new ShowCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Command for ShowCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        self.context
            .config
            .to_toml()
            .map_err(|e| CliError::ConfigError(e.to_string()))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "show".to_string(),
            description: "Print the loaded configuration as TOML".to_string(),
            category: "config".to_string(),
            args: vec![],
            examples: vec!["config show".to_string()],
        }
    }
}
