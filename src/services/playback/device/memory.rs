use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, trace};

use super::{AudioDevice, DeviceError, DeviceEvent, SourceEvent, SourceId};

const EVENT_CAPACITY: usize = 256;

/// A command the device received, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    /// `load(url)`
    Load(String),
    /// `unload()`
    Unload,
    /// `play()`
    Play,
    /// `pause()`
    Pause,
    /// `seek(seconds)`
    Seek(f64),
    /// `set_volume(level)`
    SetVolume(f64),
    /// `set_playback_rate(rate)`
    SetPlaybackRate(f64),
}

#[derive(Debug, Default)]
struct DeviceState {
    source: Option<(String, SourceId)>,
    loads: u64,
    playing: bool,
    position: f64,
    duration: f64,
    volume: f64,
    rate: f64,
    autoplay_blocked: bool,
    failing_sources: HashSet<String>,
    durations: HashMap<String, f64>,
    default_duration: Option<f64>,
    commands: Vec<DeviceCommand>,
}

impl DeviceState {
    fn current_id(&self) -> Option<SourceId> {
        self.source.as_ref().map(|(_, id)| *id)
    }
}

/// Software audio device that keeps time without producing sound.
///
/// Used by the REPL host and by tests. Position only advances when
/// [`MemoryDevice::advance`] is called, which makes every timing
/// deterministic. Every command is recorded for inspection.
#[derive(Debug)]
pub struct MemoryDevice {
    state: Mutex<DeviceState>,
    events_tx: broadcast::Sender<SourceEvent>,
}

impl Default for MemoryDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDevice {
    /// Create a device with no configured sources
    pub fn new() -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Mutex::new(DeviceState {
                volume: 1.0,
                rate: 1.0,
                ..DeviceState::default()
            }),
            events_tx,
        }
    }

    /// Report `seconds` as the length of `url` once it loads
    pub fn with_duration(self, url: impl Into<String>, seconds: f64) -> Self {
        self.state().durations.insert(url.into(), seconds);
        self
    }

    /// Report `seconds` as the length of any source without its own entry
    pub fn with_default_duration(self, seconds: f64) -> Self {
        self.state().default_duration = Some(seconds);
        self
    }

    /// Make `url` fail to load
    pub fn with_failing_source(self, url: impl Into<String>) -> Self {
        self.state().failing_sources.insert(url.into());
        self
    }

    /// Refuse `play()` as a browser autoplay policy would
    pub fn set_autoplay_blocked(&self, blocked: bool) {
        self.state().autoplay_blocked = blocked;
    }

    /// Advance the clock by `seconds` of wall time.
    ///
    /// Emits a time update while playing, and `Ended` when the end of a
    /// known-length source is reached.
    pub fn advance(&self, seconds: f64) {
        let (id, position, ended) = {
            let mut state = self.state();
            let Some(id) = state.current_id() else {
                return;
            };
            if !state.playing {
                return;
            }

            let mut position = state.position + seconds.max(0.0) * state.rate;
            let ended = state.duration > 0.0 && position >= state.duration;
            if ended {
                position = state.duration;
                state.playing = false;
            }
            state.position = position;
            (id, position, ended)
        };

        self.emit(id, DeviceEvent::TimeUpdate(position));
        if ended {
            self.emit(id, DeviceEvent::Ended);
        }
    }

    /// Stop as if the source played to its end
    pub fn finish(&self) {
        let (id, position) = {
            let mut state = self.state();
            let Some(id) = state.current_id() else {
                return;
            };
            state.playing = false;
            if state.duration > 0.0 {
                state.position = state.duration;
            }
            (id, state.position)
        };
        self.emit(id, DeviceEvent::TimeUpdate(position));
        self.emit(id, DeviceEvent::Ended);
    }

    /// Revoke playback after it started, as a late autoplay rejection would
    pub fn reject_playback(&self) {
        let Some(id) = self.stop_current() else {
            return;
        };
        self.emit(id, DeviceEvent::PlayRejected);
    }

    /// Fail the current source after it was accepted
    pub fn fail_source(&self, reason: impl Into<String>) {
        let Some(id) = self.stop_current() else {
            return;
        };
        self.emit(id, DeviceEvent::LoadFailed(reason.into()));
    }

    /// Deliver an event tagged with `source`, as a backend would when a
    /// report for an earlier load arrives late
    pub fn deliver(&self, source: SourceId, event: DeviceEvent) {
        self.emit(source, event);
    }

    /// Currently bound source
    pub fn source(&self) -> Option<String> {
        self.state().source.as_ref().map(|(url, _)| url.clone())
    }

    /// Id of the currently bound source
    pub fn source_id(&self) -> Option<SourceId> {
        self.state().current_id()
    }

    /// Whether the device is producing output
    pub fn is_playing(&self) -> bool {
        self.state().playing
    }

    /// Current output level
    pub fn volume(&self) -> f64 {
        self.state().volume
    }

    /// Current rate multiplier
    pub fn playback_rate(&self) -> f64 {
        self.state().rate
    }

    /// Every command received so far
    pub fn commands(&self) -> Vec<DeviceCommand> {
        self.state().commands.clone()
    }

    /// Forget recorded commands
    pub fn clear_commands(&self) {
        self.state().commands.clear();
    }

    /// Events emitted but not yet received by every subscriber
    pub fn pending_events(&self) -> usize {
        self.events_tx.len()
    }

    fn stop_current(&self) -> Option<SourceId> {
        let mut state = self.state();
        let id = state.current_id()?;
        state.playing = false;
        Some(id)
    }

    fn emit(&self, source: SourceId, event: DeviceEvent) {
        trace!(?source, ?event, "Device event");
        let _ = self.events_tx.send(SourceEvent { source, event });
    }

    fn record(&self, command: DeviceCommand) -> MutexGuard<'_, DeviceState> {
        let mut state = self.state();
        state.commands.push(command);
        state
    }

    fn state(&self) -> MutexGuard<'_, DeviceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AudioDevice for MemoryDevice {
    async fn load(&self, url: &str) -> Result<SourceId, DeviceError> {
        let (id, duration) = {
            let mut state = self.record(DeviceCommand::Load(url.to_string()));

            if state.failing_sources.contains(url) {
                state.source = None;
                state.playing = false;
                return Err(DeviceError::LoadFailed {
                    url: url.to_string(),
                    reason: "source not found".to_string(),
                });
            }

            let duration = state
                .durations
                .get(url)
                .copied()
                .or(state.default_duration)
                .unwrap_or(0.0);

            state.loads += 1;
            let id = SourceId(state.loads);
            state.source = Some((url.to_string(), id));
            state.playing = false;
            state.position = 0.0;
            state.duration = duration;
            (id, duration)
        };

        debug!(url, ?id, duration, "Source loaded");
        if duration > 0.0 {
            self.emit(id, DeviceEvent::DurationKnown(duration));
        }
        Ok(id)
    }

    async fn unload(&self) {
        let mut state = self.record(DeviceCommand::Unload);
        state.source = None;
        state.playing = false;
        state.position = 0.0;
        state.duration = 0.0;
    }

    async fn play(&self) -> Result<(), DeviceError> {
        let mut state = self.record(DeviceCommand::Play);

        if state.source.is_none() {
            return Err(DeviceError::Unavailable("no source loaded".to_string()));
        }
        if state.autoplay_blocked {
            state.playing = false;
            return Err(DeviceError::PlaybackRejected);
        }

        state.playing = true;
        Ok(())
    }

    async fn pause(&self) {
        let mut state = self.record(DeviceCommand::Pause);
        state.playing = false;
    }

    async fn seek(&self, seconds: f64) {
        let mut state = self.record(DeviceCommand::Seek(seconds));
        state.position = seconds;
    }

    async fn set_volume(&self, volume: f64) {
        let mut state = self.record(DeviceCommand::SetVolume(volume));
        state.volume = volume;
    }

    async fn set_playback_rate(&self, rate: f64) {
        let mut state = self.record(DeviceCommand::SetPlaybackRate(rate));
        state.rate = rate;
    }

    fn position(&self) -> f64 {
        self.state().position
    }

    fn events(&self) -> broadcast::Receiver<SourceEvent> {
        self.events_tx.subscribe()
    }
}
