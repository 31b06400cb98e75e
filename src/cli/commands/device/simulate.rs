use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult, SessionContext,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    services::playback::surfaces::format_clock,
};

fn require_source(context: &SessionContext) -> Result<(), CliError> {
    if context.device.source().is_some() {
        Ok(())
    } else {
        Err(CliError::ServiceError {
            service: "Device".to_string(),
            details: "no source loaded".to_string(),
        })
    }
}

/// Let wall time pass on the device
pub struct TickCommand {
    context: Arc<SessionContext>,
}

impl TickCommand {
    /// Creates a new TickCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Command for TickCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let seconds = args
            .first()
            .and_then(|secs| secs.parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .ok_or_else(|| CliError::invalid("seconds", "must be a non-negative number"))?;

        self.context.device.advance(seconds);
        self.context.settle().await;

        let session = self.context.orchestrator.snapshot();
        Ok(format!(
            "{} / {}",
            format_clock(session.current_time),
            format_clock(session.duration)
        ))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "tick".to_string(),
            description: "Advance the device clock".to_string(),
            category: "device".to_string(),
            args: vec![CommandArg {
                name: "seconds".to_string(),
                description: "Wall-clock seconds to pass".to_string(),
                required: true,
                value_type: ArgType::Number,
            }],
            examples: vec!["device tick 5".to_string()],
        }
    }
}

/// Play the current source to its end
pub struct EndCommand {
    context: Arc<SessionContext>,
}

impl EndCommand {
    /// Creates a new EndCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Command for EndCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        require_source(&self.context)?;
        self.context.device.finish();
        Ok("Source ended".to_string())
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "end".to_string(),
            description: "Reach the end of the current source".to_string(),
            category: "device".to_string(),
            args: vec![],
            examples: vec!["device end".to_string()],
        }
    }
}

/// Revoke playback as an autoplay policy would
pub struct RejectCommand {
    context: Arc<SessionContext>,
}

impl RejectCommand {
    /// Creates a new RejectCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Command for RejectCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        match args.first().map(String::as_str) {
            Some("on") => {
                self.context.device.set_autoplay_blocked(true);
                Ok("Autoplay blocked".to_string())
            }
            Some("off") => {
                self.context.device.set_autoplay_blocked(false);
                Ok("Autoplay allowed".to_string())
            }
            Some(other) => Err(CliError::invalid(
                "policy",
                format!("expected 'on' or 'off', got '{other}'"),
            )),
            None => {
                require_source(&self.context)?;
                self.context.device.reject_playback();
                Ok("Playback rejected".to_string())
            }
        }
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "reject".to_string(),
            description: "Reject playback now, or block future play requests".to_string(),
            category: "device".to_string(),
            args: vec![CommandArg {
                name: "policy".to_string(),
                description: "'on' to block every play, 'off' to allow again".to_string(),
                required: false,
                value_type: ArgType::String,
            }],
            examples: vec![
                "device reject".to_string(),
                "device reject on".to_string(),
            ],
        }
    }
}

/// Fail the current source
pub struct FailCommand {
    context: Arc<SessionContext>,
}

impl FailCommand {
    /// Creates a new FailCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Command for FailCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        require_source(&self.context)?;
        let reason = args
            .first()
            .cloned()
            .unwrap_or_else(|| "source failed".to_string());
        self.context.device.fail_source(reason.clone());
        Ok(format!("Source failed: {reason}"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "fail".to_string(),
            description: "Fail the current source with a reason".to_string(),
            category: "device".to_string(),
            args: vec![CommandArg {
                name: "reason".to_string(),
                description: "Failure reason shown in the player".to_string(),
                required: false,
                value_type: ArgType::String,
            }],
            examples: vec!["device fail \"network error\"".to_string()],
        }
    }
}
