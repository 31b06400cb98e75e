//! Player commands: everything a presentation surface can ask for
mod change;
mod mode;
mod output;
mod play;
mod seek;
mod status;
mod transport;

pub use change::{CancelCommand, ConfirmCommand};
pub use mode::{CloseCommand, ExpandCommand, MinimizeCommand};
pub use output::{MuteCommand, SpeedCommand, VolumeCommand};
pub use play::PlayCommand;
pub use seek::SeekCommand;
pub use status::StatusCommand;
pub use transport::{PauseCommand, ResumeCommand, ToggleCommand};

use std::sync::Arc;

use crate::cli::{CliError, CommandRegistry, SessionContext};
use crate::services::playback::{AudioOrchestrator, PlaybackSession};

const CATEGORY_NAME: &str = "player";

/// Registers all player commands with the command registry
pub fn register_commands(registry: &mut CommandRegistry, context: &Arc<SessionContext>) {
    registry.register_command(CATEGORY_NAME, Box::new(PlayCommand::new(context.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(ConfirmCommand::new(context.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(CancelCommand::new(context.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(ToggleCommand::new(context.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(PauseCommand::new(context.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(ResumeCommand::new(context.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(SeekCommand::new(context.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(VolumeCommand::new(context.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(MuteCommand::new(context.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(SpeedCommand::new(context.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(ExpandCommand::new(context.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(MinimizeCommand::new(context.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(CloseCommand::new(context.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(StatusCommand::new(context.clone())));
}

fn active_session(orchestrator: &AudioOrchestrator) -> Result<PlaybackSession, CliError> {
    let session = orchestrator.snapshot();
    if session.is_active() {
        Ok(session)
    } else {
        Err(CliError::NoActiveSession)
    }
}

/// Wait for the device, then describe what it actually did.
async fn playback_report(context: &SessionContext) -> String {
    context.settle().await;
    let session = context.orchestrator.snapshot();
    let title = session.display_title();

    if let Some(reason) = &session.load_error {
        format!("Could not load \"{title}\": {reason}")
    } else if session.is_playing {
        format!("Playing \"{title}\"")
    } else {
        format!("Paused \"{title}\"")
    }
}
