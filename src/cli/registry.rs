use std::{collections::HashMap, sync::Arc};

use super::{
    CliError, Command, SessionContext,
    commands::{config, device, player, ui},
    types::CommandMetadata,
};

/// Registry for CLI commands organized by category.
///
/// ```text
/// registry
/// ├── player
/// │   ├── play
/// │   ├── confirm
/// │   └── ...
/// ├── device
/// │   ├── tick
/// │   └── ...
/// ├── ui
/// └── config
/// ```
pub struct CommandRegistry {
    /// category name -> (command name -> command implementation)
    categories: HashMap<String, HashMap<String, Box<dyn Command>>>,
    context: Arc<SessionContext>,
}

impl CommandRegistry {
    /// Creates an empty registry whose commands will share `context`.
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self {
            categories: HashMap::new(),
            context,
        }
    }

    /// Registers a command in the specified category.
    ///
    /// A command with the same name in the same category is replaced.
    pub fn register_command(&mut self, category: &str, command: Box<dyn Command>) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(command.metadata().name, command);
    }

    /// Whether `category` has any commands
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    /// Executes a command by category and name with the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CommandNotFound` if the category or command does
    /// not exist, `CliError::InvalidArguments` if the argument count is
    /// wrong, and whatever the command itself returns.
    pub async fn execute(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        let found_category = self.categories.get(category).ok_or_else(|| {
            CliError::CommandNotFound(format!("Failed to find category '{category}'"))
        })?;

        let found_command = found_category.get(command_name).ok_or_else(|| {
            CliError::CommandNotFound(format!(
                "Failed to find command '{command_name}' in '{category}'"
            ))
        })?;

        Self::validate_args(&found_command.metadata(), args)?;

        found_command.execute(args).await
    }

    /// Lists all registered commands organized by category.
    ///
    /// Categories and commands are sorted alphabetically.
    pub fn list_commands(&self) -> Vec<(String, Vec<String>)> {
        let mut categories: Vec<(String, Vec<String>)> = self
            .categories
            .iter()
            .map(|(category, commands)| {
                let mut command_list: Vec<String> = commands.keys().cloned().collect();
                command_list.sort();

                (category.clone(), command_list)
            })
            .collect();

        categories.sort();

        categories
    }

    /// Metadata of every command in `category`, sorted by name
    pub fn category_metadata(&self, category: &str) -> Vec<CommandMetadata> {
        let mut metadata: Vec<CommandMetadata> = self
            .categories
            .get(category)
            .map(|commands| commands.values().map(|command| command.metadata()).collect())
            .unwrap_or_default();

        metadata.sort_by(|a, b| a.name.cmp(&b.name));
        metadata
    }

    fn validate_args(metadata: &CommandMetadata, args: &[String]) -> Result<(), CliError> {
        let required_count = metadata.args.iter().filter(|arg| arg.required).count();
        let total_count = metadata.args.len();

        if args.len() < required_count {
            return Err(CliError::InvalidArguments(format!(
                "{} expects at least {} arguments, got {}",
                metadata.name,
                required_count,
                args.len(),
            )));
        }

        if args.len() > total_count {
            return Err(CliError::InvalidArguments(format!(
                "{} expects at most {} arguments, got {}",
                metadata.name,
                total_count,
                args.len(),
            )));
        }

        Ok(())
    }

    /// Registers every built-in command in its category.
    pub fn register_all_commands(&mut self) {
        let context = self.context.clone();
        player::register_commands(self, &context);
        device::register_commands(self, &context);
        ui::register_commands(self, &context);
        config::register_commands(self, &context);
    }
}
