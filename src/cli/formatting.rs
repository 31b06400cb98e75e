//! Formatting utilities for CLI output.
//!
//! Styled help text and session summaries for the REPL.

use crate::services::playback::PlaybackSession;
use crate::services::playback::surfaces::format_clock;

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";

    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Green color
    pub const GREEN: &'static str = "\x1b[32m";
    /// Blue color
    pub const BLUE: &'static str = "\x1b[34m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Formats section headers with styling
pub fn format_header(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::CYAN, text, Colors::RESET)
}

/// Formats command names with styling
pub fn format_command(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::GREEN, text, Colors::RESET)
}

/// Formats category names with styling
pub fn format_category(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::BLUE, text, Colors::RESET)
}

/// Formats descriptions with muted styling
pub fn format_description(text: &str) -> String {
    format!("{}{}{}", Colors::DIM, text, Colors::RESET)
}

/// Formats error messages with red styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// Plain-text summary of a session, one field per line.
///
/// Used by `player status`; kept free of color codes so scripts can
/// match on it.
pub fn format_session(session: &PlaybackSession) -> String {
    let Some(url) = &session.audio_url else {
        return format!("mode: {}\nnothing playing", session.mode);
    };

    let state = if let Some(reason) = &session.load_error {
        format!("error ({reason})")
    } else if session.is_loading {
        "loading".to_string()
    } else if session.is_playing {
        "playing".to_string()
    } else {
        "paused".to_string()
    };

    let volume = if session.is_muted {
        "muted".to_string()
    } else {
        format!("{:.0}%", session.volume.as_percentage())
    };

    let mut lines = vec![
        format!("mode: {}", session.mode),
        format!("track: {} <{url}>", session.display_title()),
        format!("state: {state}"),
        format!(
            "position: {} / {}",
            format_clock(session.current_time),
            format_clock(session.duration)
        ),
        format!("volume: {volume}"),
        format!("speed: {}", session.speed),
    ];

    if let Some(pending) = &session.pending_audio {
        lines.push(format!("pending: {}", pending.display_title()));
    }

    lines.join("\n")
}
