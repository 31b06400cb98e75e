use futures::Stream;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::services::common::Property;

use super::session::PlaybackSession;
use super::types::{PlayOutcome, PlaybackSpeed, PlayerMode, Track, Volume};

/// Construction options for [`AudioOrchestrator`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrchestratorOptions {
    /// Surface a new session opens in when nothing is remembered
    pub default_mode: PlayerMode,

    /// Reopen in the last surface the user left the player in
    pub remember_mode: bool,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            default_mode: PlayerMode::Full,
            remember_mode: true,
        }
    }
}

/// Single source of truth for playback intent.
///
/// Owns the [`PlaybackSession`] and exposes the operations the UI may
/// call. It never touches the audio device: the device sync layer
/// observes committed snapshots and applies them. All operations are
/// synchronous, never fail, and commit at most one snapshot each.
#[derive(Debug)]
pub struct AudioOrchestrator {
    session: Property<PlaybackSession>,
    options: OrchestratorOptions,
}

impl Default for AudioOrchestrator {
    fn default() -> Self {
        Self::new(OrchestratorOptions::default())
    }
}

impl AudioOrchestrator {
    /// Create an orchestrator with no session
    pub fn new(options: OrchestratorOptions) -> Self {
        let default_mode = if options.default_mode.is_closed() {
            PlayerMode::Full
        } else {
            options.default_mode
        };

        let session = PlaybackSession {
            last_mode: default_mode,
            ..PlaybackSession::default()
        };

        Self {
            session: Property::new(session),
            options: OrchestratorOptions {
                default_mode,
                ..options
            },
        }
    }

    /// Restore saved output preferences and the remembered surface.
    pub fn restore_preferences(
        &self,
        volume: Volume,
        muted: bool,
        speed: PlaybackSpeed,
        last_mode: Option<PlayerMode>,
    ) {
        self.commit(|session| {
            session.volume = volume;
            session.is_muted = muted;
            session.speed = speed;
            if let Some(mode) = last_mode.filter(|mode| !mode.is_closed()) {
                session.last_mode = mode;
            }
        });
    }

    /// Ask to play a track.
    ///
    /// Starts immediately when nothing is loaded, resumes when the same
    /// track is loaded, and otherwise parks the request until the user
    /// confirms or cancels the switch. A newer request replaces an older
    /// pending one.
    #[instrument(skip(self), fields(url = %track.url))]
    pub fn request_play(&self, track: Track) -> PlayOutcome {
        let mut outcome = PlayOutcome::Started;
        let open_mode = |session: &PlaybackSession| self.open_mode(session);

        self.commit(|session| {
            if !session.is_active() {
                let mode = open_mode(session);
                session.start(track, mode);
            } else if session.is_current(&track.url) {
                if session.load_error.is_some() {
                    let mode = session.mode;
                    session.start(track, mode);
                    outcome = PlayOutcome::Started;
                } else {
                    session.is_playing = true;
                    outcome = PlayOutcome::Resumed;
                }
            } else {
                session.pending_audio = Some(track);
                session.show_change_confirm = true;
                outcome = PlayOutcome::AwaitingConfirmation;
            }
        });

        debug!(?outcome, "Play requested");
        outcome
    }

    /// Switch to the pending track. No-op when nothing is pending.
    ///
    /// Returns whether a switch happened.
    pub fn confirm_audio_change(&self) -> bool {
        let mut switched = false;
        let open_mode = |session: &PlaybackSession| self.open_mode(session);

        self.commit(|session| {
            let Some(track) = session.pending_audio.take() else {
                return;
            };
            let mode = open_mode(session);
            session.start(track, mode);
            switched = true;
        });

        if switched {
            info!(url = ?self.session.get().audio_url, "Audio change confirmed");
        }
        switched
    }

    /// Drop the pending track. No-op when nothing is pending.
    ///
    /// Returns whether a pending request was dropped.
    pub fn cancel_audio_change(&self) -> bool {
        let mut cancelled = false;

        self.commit(|session| {
            if session.pending_audio.take().is_some() {
                cancelled = true;
            }
            session.show_change_confirm = false;
        });

        if cancelled {
            debug!("Audio change cancelled");
        }
        cancelled
    }

    /// Resume playback of the loaded track.
    pub fn play(&self) {
        self.commit(|session| {
            if session.is_active() {
                session.is_playing = true;
            }
        });
    }

    /// Flip between playing and paused. Returns the new play state.
    pub fn toggle_play(&self) -> bool {
        let mut playing = false;

        self.commit(|session| {
            if session.is_active() {
                session.is_playing = !session.is_playing;
            }
            playing = session.is_playing;
        });

        playing
    }

    /// Stop advancing. Calling it again changes nothing.
    pub fn pause(&self) {
        self.commit(|session| session.is_playing = false);
    }

    /// Jump to a position, clamped into the track. Returns the position
    /// actually committed.
    pub fn seek(&self, seconds: f64) -> f64 {
        let mut position = 0.0;

        self.commit(|session| {
            if session.is_active() {
                session.current_time = session.clamp_position(seconds);
            }
            position = session.current_time;
        });

        debug!(requested = seconds, position, "Seek");
        position
    }

    /// Move the position by `delta` seconds.
    pub fn skip(&self, delta: f64) -> f64 {
        let mut position = 0.0;

        self.commit(|session| {
            if session.is_active() {
                session.current_time = session.clamp_position(session.current_time + delta);
            }
            position = session.current_time;
        });

        debug!(delta, position, "Skip");
        position
    }

    /// Set the output volume; clamped into `[0, 1]`.
    pub fn set_volume(&self, volume: f64) {
        self.commit(|session| session.volume = Volume::new(volume));
    }

    /// Mute or unmute output.
    pub fn set_muted(&self, muted: bool) {
        self.commit(|session| session.is_muted = muted);
    }

    /// Flip the mute flag. Returns the new value.
    pub fn toggle_mute(&self) -> bool {
        let mut muted = false;
        self.commit(|session| {
            session.is_muted = !session.is_muted;
            muted = session.is_muted;
        });
        muted
    }

    /// Set the playback rate.
    pub fn set_speed(&self, speed: PlaybackSpeed) {
        self.commit(|session| session.speed = speed);
    }

    /// Step to the next playback rate, wrapping. Returns the new rate.
    pub fn cycle_speed(&self) -> PlaybackSpeed {
        let mut speed = PlaybackSpeed::default();
        self.commit(|session| {
            session.speed = session.speed.next();
            speed = session.speed;
        });
        speed
    }

    /// Grow the player by one surface. Returns the resulting mode.
    pub fn expand(&self) -> PlayerMode {
        self.transition(PlayerMode::expanded)
    }

    /// Shrink the player by one surface. Returns the resulting mode.
    pub fn minimize(&self) -> PlayerMode {
        self.transition(PlayerMode::minimized)
    }

    /// Show a specific surface. `Closed` tears the session down; other
    /// modes are ignored while nothing is loaded.
    pub fn set_mode(&self, mode: PlayerMode) -> PlayerMode {
        if mode.is_closed() {
            self.close();
            return PlayerMode::Closed;
        }
        self.transition(|_| mode)
    }

    /// Hide the player and destroy the session.
    pub fn close(&self) {
        let changed = self.commit(PlaybackSession::teardown);
        if changed {
            info!("Playback session closed");
        }
    }

    /// Clone of the current session
    pub fn snapshot(&self) -> PlaybackSession {
        self.session.get()
    }

    /// Stream of committed sessions, starting with the current one
    pub fn watch(&self) -> impl Stream<Item = PlaybackSession> + Send + 'static {
        self.session.watch()
    }

    /// Stream of a derived slice, yielded only when the slice changes
    pub fn watch_slice<U, F>(&self, project: F) -> impl Stream<Item = U> + Send + 'static
    where
        U: Clone + PartialEq + Send + 'static,
        F: FnMut(&PlaybackSession) -> U + Send + 'static,
    {
        self.session.watch_map(project)
    }

    /// Receiver for observers that run their own select loop
    pub fn subscribe(&self) -> watch::Receiver<PlaybackSession> {
        self.session.subscribe()
    }

    /// Number of changes committed so far
    pub fn revision(&self) -> u64 {
        self.session.get().revision
    }

    pub(crate) fn set_current_time(&self, seconds: f64) {
        self.commit(|session| {
            if session.is_active() {
                session.current_time = session.clamp_position(seconds);
            }
        });
    }

    pub(crate) fn set_duration(&self, seconds: f64) {
        self.commit(|session| {
            if !session.is_active() {
                return;
            }
            session.duration = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
            session.is_loading = false;
            session.current_time = session.clamp_position(session.current_time);
        });
    }

    pub(crate) fn report_play_rejected(&self) {
        let changed = self.commit(|session| session.is_playing = false);
        if changed {
            warn!("Playback rejected by device; reverting to paused");
        }
    }

    pub(crate) fn report_load_failure(&self, reason: &str) {
        let changed = self.commit(|session| {
            if !session.is_active() {
                return;
            }
            session.is_loading = false;
            session.is_playing = false;
            session.load_error = Some(reason.to_string());
        });
        if changed {
            warn!(reason, "Audio source failed to load");
        }
    }

    fn transition(&self, next: impl FnOnce(PlayerMode) -> PlayerMode) -> PlayerMode {
        let mut mode = PlayerMode::Closed;

        self.commit(|session| {
            if session.is_active() {
                session.mode = next(session.mode);
                session.last_mode = session.mode;
            }
            mode = session.mode;
        });

        debug!(%mode, "Player mode");
        mode
    }

    fn open_mode(&self, session: &PlaybackSession) -> PlayerMode {
        if self.options.remember_mode && !session.last_mode.is_closed() {
            session.last_mode
        } else {
            self.options.default_mode
        }
    }

    fn commit(&self, apply: impl FnOnce(&mut PlaybackSession)) -> bool {
        self.session.update(|session| {
            let before = session.clone();
            apply(session);

            if *session == before {
                return false;
            }
            session.revision = before.revision + 1;
            true
        })
    }
}
