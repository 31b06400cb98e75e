use super::types::{PlaybackSpeed, PlayerMode, Track, TrackMetadata, Volume};

/// Snapshot of the process-wide playback session.
///
/// Every change is committed as a whole snapshot, so observers never see
/// a half-applied transition. The invariants below hold for every
/// committed value:
///
/// - `mode == Closed` exactly when `audio_url` is `None`
/// - `pending_audio` is set exactly when `show_change_confirm` is true
/// - once `duration > 0`, `current_time` lies in `[0, duration]`
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    /// Loaded resource; `None` means no session
    pub audio_url: Option<String>,
    /// Display title of the loaded resource
    pub title: Option<String>,
    /// Descriptive fields of the loaded resource
    pub metadata: TrackMetadata,

    /// Whether playback is requested
    pub is_playing: bool,
    /// Whether the device is still loading the source
    pub is_loading: bool,
    /// Playback position in seconds
    pub current_time: f64,
    /// Track length in seconds, `0.0` until the device reports it
    pub duration: f64,

    /// Output volume
    pub volume: Volume,
    /// Whether output is muted
    pub is_muted: bool,
    /// Playback rate
    pub speed: PlaybackSpeed,

    /// Visible presentation surface
    pub mode: PlayerMode,
    /// Surface to reopen in when the next session starts
    pub last_mode: PlayerMode,

    /// Track switch waiting for the user to confirm
    pub pending_audio: Option<Track>,
    /// Whether the confirmation prompt is visible
    pub show_change_confirm: bool,

    /// Reason the current source failed to load, if it did
    pub load_error: Option<String>,

    /// Bumped every time a source is (re)started, so the device reloads
    /// even when the URL is unchanged
    pub source_generation: u64,
    /// Bumped on every committed change
    pub revision: u64,
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self {
            audio_url: None,
            title: None,
            metadata: TrackMetadata::default(),
            is_playing: false,
            is_loading: false,
            current_time: 0.0,
            duration: 0.0,
            volume: Volume::default(),
            is_muted: false,
            speed: PlaybackSpeed::default(),
            mode: PlayerMode::Closed,
            last_mode: PlayerMode::Full,
            pending_audio: None,
            show_change_confirm: false,
            load_error: None,
            source_generation: 0,
            revision: 0,
        }
    }
}

impl PlaybackSession {
    /// Whether a resource is loaded
    pub fn is_active(&self) -> bool {
        self.audio_url.is_some()
    }

    /// Whether `url` is the loaded resource
    pub fn is_current(&self, url: &str) -> bool {
        self.audio_url.as_deref() == Some(url)
    }

    /// Volume level the device should output
    pub fn effective_volume(&self) -> f64 {
        self.volume.effective(self.is_muted)
    }

    /// Title for display, falling back to the URL
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.audio_url.as_deref())
            .unwrap_or("")
    }

    /// Clamp a position into the playable range.
    ///
    /// Before the duration is known only negative positions are rejected.
    /// Non-finite positions keep the current one, except `+inf` which
    /// lands on the end once the duration is known.
    pub fn clamp_position(&self, seconds: f64) -> f64 {
        if !seconds.is_finite() {
            return if seconds == f64::INFINITY && self.duration > 0.0 {
                self.duration
            } else {
                self.current_time
            };
        }
        if self.duration > 0.0 {
            seconds.clamp(0.0, self.duration)
        } else {
            seconds.max(0.0)
        }
    }

    /// Fraction of the track already played, `0.0` when the duration is unknown
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Bind a new source, resetting transport state.
    pub(crate) fn start(&mut self, track: Track, mode: PlayerMode) {
        self.audio_url = Some(track.url);
        self.title = track.title;
        self.metadata = track.metadata;
        self.is_playing = true;
        self.is_loading = true;
        self.current_time = 0.0;
        self.duration = 0.0;
        self.mode = mode;
        self.last_mode = mode;
        self.pending_audio = None;
        self.show_change_confirm = false;
        self.load_error = None;
        self.source_generation += 1;
    }

    /// Destroy the session. Output preferences survive.
    pub(crate) fn teardown(&mut self) {
        self.audio_url = None;
        self.title = None;
        self.metadata = TrackMetadata::default();
        self.is_playing = false;
        self.is_loading = false;
        self.current_time = 0.0;
        self.duration = 0.0;
        self.mode = PlayerMode::Closed;
        self.pending_audio = None;
        self.show_change_confirm = false;
        self.load_error = None;
    }
}
