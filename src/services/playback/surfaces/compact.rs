use crate::services::playback::PlaybackSession;

use super::{Surface, SurfaceAction, format_clock, play_glyph, truncate};

const TITLE_WIDTH: usize = 40;

/// What the compact bar shows
#[derive(Debug, Clone, PartialEq)]
pub struct CompactSlice {
    title: String,
    is_playing: bool,
    current_time: f64,
    duration: f64,
}

/// One-line bar with transport controls and time
pub struct CompactPlayer;

impl Surface for CompactPlayer {
    type Slice = CompactSlice;

    fn slice(session: &PlaybackSession) -> CompactSlice {
        CompactSlice {
            title: session.display_title().to_string(),
            is_playing: session.is_playing,
            // Whole seconds, so sub-second progress does not re-render.
            current_time: session.current_time.floor(),
            duration: session.duration.floor(),
        }
    }

    fn render(slice: &CompactSlice) -> String {
        format!(
            "{} {}  {} / {}",
            play_glyph(slice.is_playing),
            truncate(&slice.title, TITLE_WIDTH),
            format_clock(slice.current_time),
            format_clock(slice.duration)
        )
    }

    fn actions() -> &'static [SurfaceAction] {
        &[
            SurfaceAction::TogglePlay,
            SurfaceAction::SkipBack,
            SurfaceAction::SkipForward,
            SurfaceAction::Expand,
            SurfaceAction::Minimize,
            SurfaceAction::Close,
        ]
    }
}
