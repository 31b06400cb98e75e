/// Shared reactive building blocks
pub mod common;
/// Global audio playback service
pub mod playback;

pub use playback::{AudioOrchestrator, DeviceSync, PlaybackSession, PlayerMode, Track};
