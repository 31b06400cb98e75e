//! Text presentation surfaces for the playback session.
//!
//! Each surface watches its own slice of the session and offers a fixed
//! set of actions. Actions go through the orchestrator's public
//! operations only; no surface mutates the session directly.

mod compact;
mod confirm;
mod full;
mod minimized;
mod router;

pub use compact::{CompactPlayer, CompactSlice};
pub use confirm::{ChangeConfirmPrompt, ConfirmSlice};
pub use full::{FullPlayer, FullSlice};
pub use minimized::{MinimizedPlayer, MinimizedSlice};
pub use router::SurfaceRouter;

use std::fmt;

use futures::{Stream, StreamExt};

use super::{AudioOrchestrator, PlaybackSession};

/// Seconds moved by the skip buttons
pub const SKIP_SECONDS: f64 = 10.0;

/// Which surface is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Full player
    Full,
    /// Compact bar
    Compact,
    /// Minimized pill
    Minimized,
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Compact => write!(f, "compact"),
            Self::Minimized => write!(f, "minimized"),
        }
    }
}

/// A control a surface exposes to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceAction {
    /// Play/pause button
    TogglePlay,
    /// Jump back [`SKIP_SECONDS`]
    SkipBack,
    /// Jump forward [`SKIP_SECONDS`]
    SkipForward,
    /// Speed button
    CycleSpeed,
    /// Mute button
    ToggleMute,
    /// Grow the player
    Expand,
    /// Shrink the player
    Minimize,
    /// Close button
    Close,
    /// Accept the pending track
    ConfirmChange,
    /// Keep the current track
    CancelChange,
}

impl SurfaceAction {
    /// Perform the action through the orchestrator's public operations
    pub fn apply(self, orchestrator: &AudioOrchestrator) {
        match self {
            Self::TogglePlay => {
                orchestrator.toggle_play();
            }
            Self::SkipBack => {
                orchestrator.skip(-SKIP_SECONDS);
            }
            Self::SkipForward => {
                orchestrator.skip(SKIP_SECONDS);
            }
            Self::CycleSpeed => {
                orchestrator.cycle_speed();
            }
            Self::ToggleMute => {
                orchestrator.toggle_mute();
            }
            Self::Expand => {
                orchestrator.expand();
            }
            Self::Minimize => {
                orchestrator.minimize();
            }
            Self::Close => orchestrator.close(),
            Self::ConfirmChange => {
                orchestrator.confirm_audio_change();
            }
            Self::CancelChange => {
                orchestrator.cancel_audio_change();
            }
        }
    }
}

/// A renderer over one slice of the session
pub trait Surface {
    /// Part of the session this surface depends on
    type Slice: Clone + PartialEq + Send + 'static;

    /// Extract the slice from a committed session
    fn slice(session: &PlaybackSession) -> Self::Slice;

    /// Render the slice as text
    fn render(slice: &Self::Slice) -> String;

    /// Controls this surface offers
    fn actions() -> &'static [SurfaceAction];
}

/// Stream of renders for surface `S`, re-rendered only when its slice changes
pub fn watch_surface<S>(orchestrator: &AudioOrchestrator) -> impl Stream<Item = String> + Send + 'static
where
    S: Surface + 'static,
{
    orchestrator
        .watch_slice(S::slice)
        .map(|slice| S::render(&slice))
}

/// Format seconds as `m:ss`, or `h:mm:ss` past an hour
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Fixed-width text progress bar
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
    let filled = ((fraction * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Shorten `text` to `max` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

fn play_glyph(is_playing: bool) -> &'static str {
    if is_playing { "▶" } else { "⏸" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_clock_pads_seconds() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(65.9), "1:05");
        assert_eq!(format_clock(3725.0), "1:02:05");
        assert_eq!(format_clock(-3.0), "0:00");
        assert_eq!(format_clock(f64::NAN), "0:00");
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0.0, 4), "[----]");
        assert_eq!(progress_bar(0.5, 4), "[##--]");
        assert_eq!(progress_bar(2.0, 4), "[####]");
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer title", 8), "a much …");
    }
}
