use crate::services::playback::PlaybackSession;

use super::{Surface, SurfaceAction};

/// Pending track switch, if the prompt is visible
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmSlice {
    current: String,
    pending: Option<String>,
}

/// Dialog asking whether to replace the playing track
pub struct ChangeConfirmPrompt;

impl Surface for ChangeConfirmPrompt {
    type Slice = ConfirmSlice;

    fn slice(session: &PlaybackSession) -> ConfirmSlice {
        let pending = session
            .pending_audio
            .as_ref()
            .filter(|_| session.show_change_confirm)
            .map(|track| track.display_title().to_string());

        ConfirmSlice {
            current: session.display_title().to_string(),
            pending,
        }
    }

    fn render(slice: &ConfirmSlice) -> String {
        match &slice.pending {
            Some(pending) => format!(
                "Stop \"{}\" and play \"{}\"? (confirm / cancel)",
                slice.current, pending
            ),
            None => String::new(),
        }
    }

    fn actions() -> &'static [SurfaceAction] {
        &[SurfaceAction::ConfirmChange, SurfaceAction::CancelChange]
    }
}
