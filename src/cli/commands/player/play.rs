use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult, SessionContext,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    services::playback::{PlayOutcome, Track},
};

use super::playback_report;

/// Command to request playback of a track
///
/// Mirrors a "play" button on any page: starts, resumes, or asks to
/// replace the current track.
pub struct PlayCommand {
    context: Arc<SessionContext>,
}

impl PlayCommand {
    /// Creates a new PlayCommand
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Command for PlayCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let url = args.first().map(|url| url.trim()).unwrap_or_default();
        if url.is_empty() {
            return Err(CliError::invalid("url", "must not be empty"));
        }

        let mut track = Track::new(url);
        if let Some(title) = args.get(1) {
            track = track.with_title(title.clone());
        }
        let title = track.display_title().to_string();

        match self.context.orchestrator.request_play(track) {
            PlayOutcome::AwaitingConfirmation => {
                let current = self.context.orchestrator.snapshot();
                Ok(format!(
                    "\"{}\" is playing. Switch to \"{title}\"? (confirm / cancel)",
                    current.display_title()
                ))
            }
            PlayOutcome::Started | PlayOutcome::Resumed => {
                Ok(playback_report(&self.context).await)
            }
        }
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "play".to_string(),
            description: "Play a track, asking first if another one is playing".to_string(),
            category: "player".to_string(),
            args: vec![
                CommandArg {
                    name: "url".to_string(),
                    description: "Audio source URL".to_string(),
                    required: true,
                    value_type: ArgType::Path,
                },
                CommandArg {
                    name: "title".to_string(),
                    description: "Title to show instead of the URL".to_string(),
                    required: false,
                    value_type: ArgType::String,
                },
            ],
            examples: vec![
                "play https://cdn.example/lesson-1.mp3".to_string(),
                "play https://cdn.example/lesson-2.mp3 \"At the market\"".to_string(),
            ],
        }
    }
}
