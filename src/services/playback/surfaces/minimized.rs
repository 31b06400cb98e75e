use crate::services::playback::PlaybackSession;

use super::{Surface, SurfaceAction, play_glyph, truncate};

const TITLE_WIDTH: usize = 24;

/// What the minimized pill shows
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizedSlice {
    title: String,
    is_playing: bool,
}

/// Small pill: play state and a short title
pub struct MinimizedPlayer;

impl Surface for MinimizedPlayer {
    type Slice = MinimizedSlice;

    fn slice(session: &PlaybackSession) -> MinimizedSlice {
        MinimizedSlice {
            title: session.display_title().to_string(),
            is_playing: session.is_playing,
        }
    }

    fn render(slice: &MinimizedSlice) -> String {
        format!(
            "{} {}",
            play_glyph(slice.is_playing),
            truncate(&slice.title, TITLE_WIDTH)
        )
    }

    fn actions() -> &'static [SurfaceAction] {
        &[
            SurfaceAction::TogglePlay,
            SurfaceAction::Expand,
            SurfaceAction::Close,
        ]
    }
}
