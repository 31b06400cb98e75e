use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Error, Debug)]
pub enum CliError {
    /// A command or category was not found in the registry.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Wrong number of arguments for a command.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// One argument could not be used.
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// Name of the argument
        arg: String,
        /// Why it was rejected
        reason: String,
    },

    /// A command needs a session and none is open.
    #[error("Nothing is playing")]
    NoActiveSession,

    /// An error occurred in the configuration system.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A service could not complete the request.
    #[error("{service} error: {details}")]
    ServiceError {
        /// Service that failed
        service: String,
        /// Failure details
        details: String,
    },

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CliError {
    pub(crate) fn invalid(arg: &str, reason: impl Into<String>) -> Self {
        CliError::InvalidArgument {
            arg: arg.to_string(),
            reason: reason.into(),
        }
    }
}

/// Type alias for command execution results.
///
/// Commands return the text to show the user on success.
pub type CommandResult = Result<String, CliError>;

/// Specification for a single command argument.
#[derive(Debug, Clone)]
pub struct CommandArg {
    /// The name of the argument (e.g., "url", "position").
    pub name: String,

    /// Human-readable description of what this argument does.
    pub description: String,

    /// Whether this argument is required for command execution.
    pub required: bool,

    /// The expected type of this argument for help display.
    pub value_type: ArgType,
}

/// Type classification for command arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// A general string value.
    String,

    /// A numeric value (integer or float).
    Number,

    /// A URL or navigation route.
    Path,
}

/// Complete metadata for a CLI command.
///
/// Used for help generation, argument count validation and command
/// discovery.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    /// The command name (e.g., "play", "seek").
    pub name: String,

    /// Brief description of what this command does.
    pub description: String,

    /// Specification of all arguments this command accepts.
    pub args: Vec<CommandArg>,

    /// Example usage strings to show in help text.
    pub examples: Vec<String>,

    /// Category this command belongs to (e.g., "player", "device").
    pub category: String,
}

/// Trait defining the interface for all CLI commands.
///
/// Commands receive their dependencies through their constructors.
#[async_trait]
pub trait Command: Send + Sync {
    /// Executes the command with the provided arguments.
    ///
    /// The registry has already checked the argument count against
    /// [`Command::metadata`]; the command validates the values.
    ///
    /// # Errors
    ///
    /// Returns `CliError` for invalid argument values or when the
    /// command needs state that does not exist.
    async fn execute(&self, args: &[String]) -> CommandResult;

    /// Returns the complete metadata for this command.
    fn metadata(&self) -> CommandMetadata;
}
