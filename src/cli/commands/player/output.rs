use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult, SessionContext,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    services::playback::PlaybackSpeed,
};

/// Command to set the output volume
pub struct VolumeCommand {
    context: Arc<SessionContext>,
}

impl VolumeCommand {
    /// Creates a new VolumeCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Command for VolumeCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let Some(level) = args.first() else {
            let session = self.context.orchestrator.snapshot();
            return Ok(format!("Volume {:.0}%", session.volume.as_percentage()));
        };

        let percent = level
            .trim_end_matches('%')
            .parse::<f64>()
            .ok()
            .filter(|percent| (0.0..=100.0).contains(percent))
            .ok_or_else(|| CliError::invalid("level", "must be a number between 0 and 100"))?;

        self.context.orchestrator.set_volume(percent / 100.0);
        Ok(format!("Volume {percent:.0}%"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "volume".to_string(),
            description: "Show or set the volume".to_string(),
            category: "player".to_string(),
            args: vec![CommandArg {
                name: "level".to_string(),
                description: "Volume from 0 to 100".to_string(),
                required: false,
                value_type: ArgType::Number,
            }],
            examples: vec!["volume".to_string(), "volume 60".to_string()],
        }
    }
}

/// Mute button
pub struct MuteCommand {
    context: Arc<SessionContext>,
}

impl MuteCommand {
    /// Creates a new MuteCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Command for MuteCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        if self.context.orchestrator.toggle_mute() {
            Ok("Muted".to_string())
        } else {
            Ok("Unmuted".to_string())
        }
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "mute".to_string(),
            description: "Toggle mute without losing the volume level".to_string(),
            category: "player".to_string(),
            args: vec![],
            examples: vec!["mute".to_string()],
        }
    }
}

/// Speed button, or set a specific rate
pub struct SpeedCommand {
    context: Arc<SessionContext>,
}

impl SpeedCommand {
    /// Creates a new SpeedCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Command for SpeedCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let speed = match args.first() {
            Some(rate) => {
                let speed = rate
                    .parse::<PlaybackSpeed>()
                    .map_err(|e| CliError::invalid("rate", e.to_string()))?;
                self.context.orchestrator.set_speed(speed);
                speed
            }
            None => self.context.orchestrator.cycle_speed(),
        };

        Ok(format!("Speed {speed}"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "speed".to_string(),
            description: "Set the playback rate, or step to the next one".to_string(),
            category: "player".to_string(),
            args: vec![CommandArg {
                name: "rate".to_string(),
                description: "One of 0.75, 1, 1.25, 1.5, 2".to_string(),
                required: false,
                value_type: ArgType::Number,
            }],
            examples: vec!["speed".to_string(), "speed 1.25".to_string()],
        }
    }
}
