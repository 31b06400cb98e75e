use regex::Regex;

use crate::services::playback::{PlaybackSession, PlayerMode};

use super::{
    ChangeConfirmPrompt, CompactPlayer, FullPlayer, MinimizedPlayer, Surface, SurfaceKind,
};

/// Chooses which surface is visible for a mode and navigation route.
///
/// Route patterns come from the host's configuration:
/// - on a *listening* route the page renders its own full controls, so
///   the global full player is suppressed there
/// - on a *hidden* route no player surface is rendered at all
#[derive(Debug, Clone, Default)]
pub struct SurfaceRouter {
    listening: Vec<Regex>,
    hidden: Vec<Regex>,
}

impl SurfaceRouter {
    /// Create a router from compiled route patterns
    pub fn new(listening: Vec<Regex>, hidden: Vec<Regex>) -> Self {
        Self { listening, hidden }
    }

    /// Compile route patterns into a router
    ///
    /// # Errors
    /// Returns the first pattern that fails to compile.
    pub fn from_patterns(listening: &[String], hidden: &[String]) -> Result<Self, regex::Error> {
        let compile = |patterns: &[String]| -> Result<Vec<Regex>, regex::Error> {
            patterns.iter().map(|p| Regex::new(p)).collect()
        };

        Ok(Self::new(compile(listening)?, compile(hidden)?))
    }

    /// Whether `route` is a dedicated listening page
    pub fn is_listening_route(&self, route: &str) -> bool {
        self.listening.iter().any(|pattern| pattern.is_match(route))
    }

    /// Whether `route` hides the player
    pub fn is_hidden_route(&self, route: &str) -> bool {
        self.hidden.iter().any(|pattern| pattern.is_match(route))
    }

    /// Surface to show for `mode` on `route`, if any
    pub fn visible_surface(&self, mode: PlayerMode, route: &str) -> Option<SurfaceKind> {
        if self.is_hidden_route(route) {
            return None;
        }

        match mode {
            PlayerMode::Closed => None,
            PlayerMode::Full if self.is_listening_route(route) => None,
            PlayerMode::Full => Some(SurfaceKind::Full),
            PlayerMode::Compact => Some(SurfaceKind::Compact),
            PlayerMode::Minimized => Some(SurfaceKind::Minimized),
        }
    }

    /// Render whatever the user sees on `route`: the visible surface and
    /// the change prompt when it is open.
    pub fn render(&self, session: &PlaybackSession, route: &str) -> String {
        let surface = match self.visible_surface(session.mode, route) {
            Some(SurfaceKind::Full) => FullPlayer::render(&FullPlayer::slice(session)),
            Some(SurfaceKind::Compact) => CompactPlayer::render(&CompactPlayer::slice(session)),
            Some(SurfaceKind::Minimized) => {
                MinimizedPlayer::render(&MinimizedPlayer::slice(session))
            }
            None => String::new(),
        };

        let prompt = ChangeConfirmPrompt::render(&ChangeConfirmPrompt::slice(session));

        match (surface.is_empty(), prompt.is_empty()) {
            (_, true) => surface,
            (true, false) => prompt,
            (false, false) => format!("{surface}\n{prompt}"),
        }
    }
}
