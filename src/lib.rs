//! lingoplay - one global audio player for a language-learning app.
//!
//! Any page can ask to play a track; a single [`AudioOrchestrator`] owns
//! the playback session, asks before replacing the track that is
//! playing, and keeps the session in one of four presentation modes. A
//! [`DeviceSync`] task keeps the one audio device in step with it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lingoplay::services::playback::{
//!     AudioOrchestrator, DeviceSync, MemoryDevice, PlayOutcome, Track, DEFAULT_SEEK_TOLERANCE,
//! };
//!
//! # async fn demo() {
//! let orchestrator = Arc::new(AudioOrchestrator::default());
//! let device = Arc::new(MemoryDevice::new());
//! let _sync = DeviceSync::start(&orchestrator, device, DEFAULT_SEEK_TOLERANCE);
//!
//! orchestrator.request_play(Track::new("https://cdn.example/lesson-1.mp3"));
//! let outcome = orchestrator.request_play(Track::new("https://cdn.example/lesson-2.mp3"));
//! assert_eq!(outcome, PlayOutcome::AwaitingConfirmation);
//! orchestrator.confirm_audio_change();
//! # }
//! ```
//!
//! [`AudioOrchestrator`]: services::playback::AudioOrchestrator
//! [`DeviceSync`]: services::playback::DeviceSync

/// Configuration schema definitions and validation.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Command interpreter for the REPL host.
pub mod cli;

/// Playback services.
pub mod services;

/// Player preferences persisted between runs.
pub mod runtime_state;

/// Logging setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{LingoplayError, Result};
