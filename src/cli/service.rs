use std::sync::Arc;

use tracing::debug;

use super::{
    CliError, CommandRegistry, SessionContext,
    formatting::{format_category, format_command, format_description, format_header},
};

const DEFAULT_CATEGORY: &str = "player";

/// Result of one REPL line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Text to print; empty for blank lines and comments
    Output(String),
    /// The user asked to leave
    Quit,
}

/// High-level service for parsing and executing REPL lines.
///
/// Every command runs to completion, including its effect on the
/// device, before the next line is read.
pub struct CliService {
    registry: CommandRegistry,
    context: Arc<SessionContext>,
}

impl CliService {
    /// Creates a CLI service with all built-in commands registered.
    pub fn new(context: Arc<SessionContext>) -> Self {
        let mut registry = CommandRegistry::new(context.clone());
        registry.register_all_commands();

        CliService { registry, context }
    }

    /// Executes a command by category and name, then lets the device
    /// catch up.
    ///
    /// # Errors
    /// Returns `CliError::CommandNotFound` if the command doesn't exist,
    /// or the error the command itself produced.
    pub async fn execute_command(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        let result = self.registry.execute(category, command_name, args).await;
        self.context.settle().await;
        result
    }

    /// Parses and runs one line of input.
    ///
    /// `#` starts a comment. Player commands may omit their category, so
    /// `pause` is the same as `player pause`.
    ///
    /// # Errors
    /// Returns `CliError` when the line cannot be parsed or the command
    /// fails.
    pub async fn execute_line(&self, line: &str) -> Result<LineOutcome, CliError> {
        let tokens = tokenize(line)?;
        let Some((first, rest)) = tokens.split_first() else {
            return Ok(LineOutcome::Output(String::new()));
        };

        debug!(command = %line.trim(), "Executing");

        match first.as_str() {
            "quit" | "exit" => Ok(LineOutcome::Quit),
            "help" => Ok(LineOutcome::Output(self.help_text(rest.first()))),
            category if self.registry.has_category(category) => {
                let Some((command, args)) = rest.split_first() else {
                    return Ok(LineOutcome::Output(self.help_text(Some(first))));
                };
                self.execute_command(category, command, args)
                    .await
                    .map(LineOutcome::Output)
            }
            command => self
                .execute_command(DEFAULT_CATEGORY, command, rest)
                .await
                .map(LineOutcome::Output),
        }
    }

    /// Lists all available commands organized by category.
    pub fn list_all(&self) -> Vec<(String, Vec<String>)> {
        self.registry.list_commands()
    }

    /// Help for every category, or for one category in detail.
    pub fn help_text(&self, category: Option<&String>) -> String {
        let mut lines = Vec::new();

        match category {
            Some(category) => {
                lines.push(format_header(&format!("{category} commands")));
                for metadata in self.registry.category_metadata(category) {
                    let args: Vec<String> = metadata
                        .args
                        .iter()
                        .map(|arg| {
                            if arg.required {
                                format!("<{}>", arg.name)
                            } else {
                                format!("[{}]", arg.name)
                            }
                        })
                        .collect();
                    lines.push(format!(
                        "  {} {}  {}",
                        format_command(&metadata.name),
                        args.join(" "),
                        format_description(&metadata.description)
                    ));
                    for example in &metadata.examples {
                        lines.push(format!("      {}", format_description(example)));
                    }
                }
            }
            None => {
                lines.push(format_header("lingoplay commands"));
                for (category, commands) in self.list_all() {
                    lines.push(format!(
                        "  {}: {}",
                        format_category(&category),
                        commands.join(", ")
                    ));
                }
                lines.push(format_description(
                    "help <category> for details, quit to leave",
                ));
            }
        }

        lines.join("\n")
    }
}

/// Split a line on whitespace, keeping double-quoted text together.
///
/// A `#` that starts a token begins a comment.
fn tokenize(line: &str) -> Result<Vec<String>, CliError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '#' if !quoted && !has_token => break,
            '"' => {
                quoted = !quoted;
                has_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if quoted {
        return Err(CliError::InvalidArguments("unterminated quote".to_string()));
    }
    if has_token {
        tokens.push(current);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::tokenize;

    #[test]
    fn tokenize_keeps_quoted_text() {
        assert_eq!(
            tokenize(r#"play https://a.mp3 "Lesson one" "#).unwrap(),
            vec!["play", "https://a.mp3", "Lesson one"]
        );
    }

    #[test]
    fn tokenize_strips_comments() {
        assert_eq!(tokenize("pause # for a moment").unwrap(), vec!["pause"]);
        assert!(tokenize("   # only a comment").unwrap().is_empty());
        assert_eq!(
            tokenize("play https://a.mp3#t=10").unwrap(),
            vec!["play", "https://a.mp3#t=10"]
        );
    }

    #[test]
    fn tokenize_rejects_open_quote() {
        assert!(tokenize(r#"play "Lesson"#).is_err());
    }
}
