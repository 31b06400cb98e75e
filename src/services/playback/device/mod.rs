//! Audio output device boundary.
//!
//! The orchestrator never talks to a device directly. A single
//! [`AudioDevice`] is owned by the device sync task, which applies session
//! changes to it and feeds its [`DeviceEvent`]s back into the session.
//! Every event is tagged with the [`SourceId`] of the load it belongs to,
//! so reports from an unloaded source can be told apart from the current
//! one.

mod memory;

pub use memory::{DeviceCommand, MemoryDevice};

use async_trait::async_trait;
use tokio::sync::broadcast;

/// Failures reported by an audio device
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// Platform policy refused to start playback (autoplay restriction)
    #[error("Playback was rejected by the platform")]
    PlaybackRejected,

    /// Source could not be fetched or decoded
    #[error("Failed to load '{url}': {reason}")]
    LoadFailed {
        /// Source that failed
        url: String,
        /// Device-provided reason
        reason: String,
    },

    /// Device cannot accept commands right now
    #[error("Audio device unavailable: {0}")]
    Unavailable(String),
}

/// Notifications originating from the device
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEvent {
    /// Periodic position report, in seconds
    TimeUpdate(f64),

    /// Track length became known, in seconds
    DurationKnown(f64),

    /// Playback reached the end of the source
    Ended,

    /// Playback was refused after it had been requested
    PlayRejected,

    /// Source failed to load after `load` returned
    LoadFailed(String),
}

/// Identity of one successful `load` on a device.
///
/// Reloading the same URL yields a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(pub u64);

/// A [`DeviceEvent`] together with the source that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct SourceEvent {
    /// Load the event belongs to
    pub source: SourceId,
    /// What happened
    pub event: DeviceEvent,
}

/// A single audio output.
///
/// Operations may complete asynchronously; failures that happen after a
/// call returns are reported through [`AudioDevice::events`].
#[async_trait]
pub trait AudioDevice: Send + Sync {
    /// Bind a new source. Any previous source must already be unloaded.
    ///
    /// Returns the id that tags every later event from this source.
    ///
    /// # Errors
    /// Returns `DeviceError::LoadFailed` if the source cannot be opened.
    async fn load(&self, url: &str) -> Result<SourceId, DeviceError>;

    /// Stop output and release the current source.
    async fn unload(&self);

    /// Start or resume output.
    ///
    /// # Errors
    /// Returns `DeviceError::PlaybackRejected` when platform policy blocks
    /// playback, or `DeviceError::Unavailable` when nothing is loaded.
    async fn play(&self) -> Result<(), DeviceError>;

    /// Pause output.
    async fn pause(&self);

    /// Move the playback position, in seconds.
    async fn seek(&self, seconds: f64);

    /// Set output level in `[0, 1]`.
    async fn set_volume(&self, volume: f64);

    /// Set playback rate multiplier.
    async fn set_playback_rate(&self, rate: f64);

    /// Current device position, in seconds.
    fn position(&self) -> f64;

    /// Subscribe to device notifications.
    fn events(&self) -> broadcast::Receiver<SourceEvent>;
}
