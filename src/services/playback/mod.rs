//! Global audio playback orchestration.
//!
//! One [`AudioOrchestrator`] owns the [`PlaybackSession`]; one
//! [`DeviceSync`] binds it to one [`AudioDevice`]; presentation surfaces
//! render slices of the session and call orchestrator operations.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lingoplay::services::playback::{
//!     AudioOrchestrator, DeviceSync, MemoryDevice, Track, DEFAULT_SEEK_TOLERANCE,
//! };
//!
//! # async fn demo() {
//! let orchestrator = Arc::new(AudioOrchestrator::default());
//! let device = Arc::new(MemoryDevice::new().with_default_duration(120.0));
//! let _sync = DeviceSync::start(&orchestrator, device, DEFAULT_SEEK_TOLERANCE);
//!
//! orchestrator.request_play(Track::new("https://cdn.example/lesson-1.mp3"));
//! # }
//! ```

/// Audio output device boundary
pub mod device;
/// Playback error types
pub mod error;
/// Session state store and operations
pub mod orchestrator;
/// Session snapshot
pub mod session;
/// Text presentation surfaces
pub mod surfaces;
/// Device sync adapter
pub mod sync;
/// Playback value types
pub mod types;

#[cfg(test)]
mod tests;

pub use device::{
    AudioDevice, DeviceCommand, DeviceError, DeviceEvent, MemoryDevice, SourceEvent, SourceId,
};
pub use error::PlaybackError;
pub use orchestrator::{AudioOrchestrator, OrchestratorOptions};
pub use session::PlaybackSession;
pub use sync::{DEFAULT_SEEK_TOLERANCE, DeviceSync};
pub use types::{PlayOutcome, PlaybackSpeed, PlayerMode, Track, TrackMetadata, Volume};
