use async_trait::async_trait;

use crate::{
    cli::{CliError, Command, CommandResult, types::CommandMetadata},
    config::Config,
};

/// Print the JSON schema of the configuration file
#[derive(Default)]
pub struct SchemaCommand;

impl SchemaCommand {
    /// Creates a new SchemaCommand
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Command for SchemaCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        Config::schema().map_err(|e| CliError::ConfigError(e.to_string()))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "schema".to_string(),
            description: "Print the configuration JSON schema".to_string(),
            category: "config".to_string(),
            args: vec![],
            examples: vec!["config schema > lingoplay.schema.json".to_string()],
        }
    }
}
