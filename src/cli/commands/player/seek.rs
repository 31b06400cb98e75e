use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult, SessionContext,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    services::playback::surfaces::format_clock,
};

use super::active_session;

/// Command to move the playback position
///
/// Supports seconds, mm:ss, percentage of the track, or a relative offset
pub struct SeekCommand {
    context: Arc<SessionContext>,
}

impl SeekCommand {
    /// Creates a new SeekCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }

    /// Resolve `input` to an absolute position in seconds.
    ///
    /// The result is not clamped; the orchestrator does that.
    pub(crate) fn parse_position(input: &str, current: f64, duration: f64) -> Result<f64, CliError> {
        if let Some(percentage) = input.strip_suffix('%') {
            let percentage = percentage
                .parse::<f64>()
                .map_err(|_| CliError::invalid("position", "Invalid percentage format"))?;

            if !(0.0..=100.0).contains(&percentage) {
                return Err(CliError::invalid(
                    "position",
                    "Percentage must be between 0 and 100",
                ));
            }
            if duration <= 0.0 {
                return Err(CliError::invalid(
                    "position",
                    "Cannot use percentage - track length unknown",
                ));
            }

            return Ok(duration * percentage / 100.0);
        }

        if let Some(sign) = input.chars().next().filter(|c| *c == '+' || *c == '-') {
            let delta = input[1..]
                .parse::<f64>()
                .ok()
                .filter(|delta| delta.is_finite())
                .ok_or_else(|| CliError::invalid("position", "Invalid relative seek format"))?;

            return Ok(if sign == '+' {
                current + delta
            } else {
                current - delta
            });
        }

        if let Some((minutes, seconds)) = input.split_once(':') {
            let minutes = minutes
                .parse::<u64>()
                .map_err(|_| CliError::invalid("position", "Invalid minutes value"))?;
            let seconds = seconds
                .parse::<f64>()
                .map_err(|_| CliError::invalid("position", "Invalid seconds value"))?;

            if !(0.0..60.0).contains(&seconds) {
                return Err(CliError::invalid(
                    "position",
                    "Seconds must be less than 60",
                ));
            }

            return Ok(minutes as f64 * 60.0 + seconds);
        }

        input
            .parse::<f64>()
            .ok()
            .filter(|seconds| seconds.is_finite())
            .ok_or_else(|| {
                CliError::invalid(
                    "position",
                    "Invalid position format. Use seconds, mm:ss, percentage (50%), or relative (+10, -10)",
                )
            })
    }
}

#[async_trait]
impl Command for SeekCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let input = args
            .first()
            .ok_or_else(|| CliError::invalid("position", "missing"))?;
        let session = active_session(&self.context.orchestrator)?;

        let target = Self::parse_position(input, session.current_time, session.duration)?;
        let position = self.context.orchestrator.seek(target);

        Ok(format!("Seeked to {}", format_clock(position)))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "seek".to_string(),
            description: "Move to a position in the current track".to_string(),
            category: "player".to_string(),
            args: vec![CommandArg {
                name: "position".to_string(),
                description: "Seconds (30), time (1:30), percentage (50%), or relative (+10, -10)"
                    .to_string(),
                required: true,
                value_type: ArgType::String,
            }],
            examples: vec![
                "seek 30".to_string(),
                "seek 1:30".to_string(),
                "seek 50%".to_string(),
                "seek -10".to_string(),
            ],
        }
    }
}
