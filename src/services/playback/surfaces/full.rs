use crate::services::playback::{PlaybackSession, PlaybackSpeed, TrackMetadata};

use super::{Surface, SurfaceAction, format_clock, play_glyph, progress_bar};

const BAR_WIDTH: usize = 30;

/// Everything the full player shows
#[derive(Debug, Clone, PartialEq)]
pub struct FullSlice {
    title: String,
    metadata: TrackMetadata,
    is_playing: bool,
    is_loading: bool,
    current_time: f64,
    duration: f64,
    volume_percent: u8,
    is_muted: bool,
    speed: PlaybackSpeed,
    load_error: Option<String>,
}

/// Full player: metadata, seek bar, output controls
pub struct FullPlayer;

impl Surface for FullPlayer {
    type Slice = FullSlice;

    fn slice(session: &PlaybackSession) -> FullSlice {
        FullSlice {
            title: session.display_title().to_string(),
            metadata: session.metadata.clone(),
            is_playing: session.is_playing,
            is_loading: session.is_loading,
            current_time: session.current_time,
            duration: session.duration,
            volume_percent: session.volume.as_percentage().round() as u8,
            is_muted: session.is_muted,
            speed: session.speed,
            load_error: session.load_error.clone(),
        }
    }

    fn render(slice: &FullSlice) -> String {
        let mut lines = vec![format!("{} {}", play_glyph(slice.is_playing), slice.title)];

        for (key, value) in slice.metadata.iter() {
            lines.push(format!("  {key}: {value}"));
        }

        let fraction = if slice.duration > 0.0 {
            slice.current_time / slice.duration
        } else {
            0.0
        };
        lines.push(format!(
            "  {} {} / {}",
            progress_bar(fraction, BAR_WIDTH),
            format_clock(slice.current_time),
            format_clock(slice.duration)
        ));

        let volume = if slice.is_muted {
            "muted".to_string()
        } else {
            format!("{}%", slice.volume_percent)
        };
        lines.push(format!("  Volume {volume} · Speed {}", slice.speed));

        if let Some(reason) = &slice.load_error {
            lines.push(format!("  Could not load audio: {reason}"));
        } else if slice.is_loading {
            lines.push("  Loading…".to_string());
        }

        lines.join("\n")
    }

    fn actions() -> &'static [SurfaceAction] {
        &[
            SurfaceAction::TogglePlay,
            SurfaceAction::SkipBack,
            SurfaceAction::SkipForward,
            SurfaceAction::CycleSpeed,
            SurfaceAction::ToggleMute,
            SurfaceAction::Minimize,
            SurfaceAction::Close,
        ]
    }
}
