use std::sync::Arc;

use async_trait::async_trait;

use crate::cli::{
    CliError, Command, CommandResult, SessionContext,
    types::{ArgType, CommandArg, CommandMetadata},
};

/// Navigate the host to another page
pub struct RouteCommand {
    context: Arc<SessionContext>,
}

impl RouteCommand {
    /// Creates a new RouteCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Command for RouteCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let Some(route) = args.first() else {
            return Ok(self.context.route());
        };

        if !route.starts_with('/') {
            return Err(CliError::invalid("path", "routes start with '/'"));
        }

        self.context.set_route(route.clone());

        let router = self.context.router();
        let note = if router.is_hidden_route(route) {
            " (player hidden)"
        } else if router.is_listening_route(route) {
            " (listening page)"
        } else {
            ""
        };
        Ok(format!("Now on {route}{note}"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "route".to_string(),
            description: "Show or change the current page".to_string(),
            category: "ui".to_string(),
            args: vec![CommandArg {
                name: "path".to_string(),
                description: "Route such as /home or /listening/3".to_string(),
                required: false,
                value_type: ArgType::Path,
            }],
            examples: vec!["ui route".to_string(), "ui route /listening/3".to_string()],
        }
    }
}
