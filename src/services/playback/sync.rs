use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace, warn};

use super::device::{AudioDevice, DeviceError, DeviceEvent, SourceEvent, SourceId};
use super::orchestrator::AudioOrchestrator;
use super::session::PlaybackSession;

/// Default gap between store and device position that counts as a seek
pub const DEFAULT_SEEK_TOLERANCE: f64 = 0.5;

const NOTHING_PROCESSED: u64 = u64::MAX;

/// What the device has been told so far.
#[derive(Debug, Default)]
struct Applied {
    source: Option<(String, u64)>,
    /// Device-side identity of `source`; `None` when its load failed
    loaded: Option<SourceId>,
    playing: bool,
    volume: Option<f64>,
    rate: Option<f64>,
}

/// Bridges the committed session and the single audio device.
///
/// Runs one task that applies session changes to the device in commit
/// order and turns device events back into session updates. Device
/// failures end here; they become session state and never reach UI code.
/// The task stops when the orchestrator is dropped or the handle is shut
/// down.
pub struct DeviceSync {
    handle: JoinHandle<()>,
    processed: Arc<AtomicU64>,
}

impl DeviceSync {
    /// Start syncing `device` with `orchestrator`.
    ///
    /// `seek_tolerance` is how far, in seconds, the session position may
    /// drift from the device before it is treated as a seek request.
    #[instrument(skip(orchestrator, device))]
    pub fn start(
        orchestrator: &Arc<AudioOrchestrator>,
        device: Arc<dyn AudioDevice>,
        seek_tolerance: f64,
    ) -> Self {
        debug!("Starting device sync");

        let processed = Arc::new(AtomicU64::new(NOTHING_PROCESSED));
        let worker = SyncWorker {
            orchestrator: Arc::downgrade(orchestrator),
            session_rx: orchestrator.subscribe(),
            events: device.events(),
            device,
            seek_tolerance: seek_tolerance.max(0.0),
            applied: Applied::default(),
            processed: processed.clone(),
        };

        let handle = tokio::spawn(worker.run());
        Self { handle, processed }
    }

    /// Revision of the last session snapshot applied to the device, or
    /// `None` before the task has applied anything
    pub fn processed_revision(&self) -> Option<u64> {
        match self.processed.load(Ordering::Acquire) {
            NOTHING_PROCESSED => None,
            revision => Some(revision),
        }
    }

    /// Whether the sync task has stopped
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop syncing. The device keeps its last state.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for DeviceSync {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

struct SyncWorker {
    orchestrator: Weak<AudioOrchestrator>,
    session_rx: watch::Receiver<PlaybackSession>,
    events: broadcast::Receiver<SourceEvent>,
    device: Arc<dyn AudioDevice>,
    seek_tolerance: f64,
    applied: Applied,
    processed: Arc<AtomicU64>,
}

impl SyncWorker {
    async fn run(mut self) {
        let initial = self.session_rx.borrow_and_update().clone();
        self.reconcile(&initial).await;

        let mut events_open = true;

        loop {
            tokio::select! {
                biased;

                changed = self.session_rx.changed() => {
                    if changed.is_err() {
                        debug!("Session store dropped, stopping device sync");
                        break;
                    }
                    let session = self.session_rx.borrow_and_update().clone();
                    self.reconcile(&session).await;
                }

                event = self.events.recv(), if events_open => {
                    match event {
                        Ok(event) => {
                            if !self.handle_event(event) {
                                break;
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!(skipped, "Device events lagged; continuing with newest");
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            debug!("Device event stream closed");
                            events_open = false;
                        }
                    }
                }
            }
        }

        debug!("Device sync ended");
    }

    /// Apply a committed snapshot to the device.
    ///
    /// Source changes come first so that nothing is applied to a source
    /// that is about to be replaced, and the old source is always unloaded
    /// before the new one is bound.
    async fn reconcile(&mut self, session: &PlaybackSession) {
        let bound = self.sync_source(session).await;
        self.sync_output(session).await;
        if bound {
            self.sync_position(session).await;
            self.sync_transport(session).await;
        }
        self.processed.store(session.revision, Ordering::Release);
    }

    /// Returns `false` when the wanted source failed to load in this pass.
    async fn sync_source(&mut self, session: &PlaybackSession) -> bool {
        let wanted = session
            .audio_url
            .as_ref()
            .map(|url| (url.clone(), session.source_generation));

        if wanted == self.applied.source {
            return true;
        }

        if self.applied.source.take().is_some() {
            self.device.unload().await;
        }
        self.applied.loaded = None;
        self.applied.playing = false;

        let Some((url, generation)) = wanted else {
            debug!("Source unloaded");
            return true;
        };

        let loaded = self.device.load(&url).await;
        self.applied.source = Some((url, generation));

        match loaded {
            Ok(id) => {
                self.applied.loaded = Some(id);
                true
            }
            Err(e) => {
                warn!(error = %e, "Source failed to load");
                self.with_orchestrator(|orchestrator| {
                    orchestrator.report_load_failure(&e.to_string())
                });
                false
            }
        }
    }

    async fn sync_output(&mut self, session: &PlaybackSession) {
        let volume = session.effective_volume();
        if self.applied.volume != Some(volume) {
            self.device.set_volume(volume).await;
            self.applied.volume = Some(volume);
        }

        let rate = session.speed.rate();
        if self.applied.rate != Some(rate) {
            self.device.set_playback_rate(rate).await;
            self.applied.rate = Some(rate);
        }
    }

    async fn sync_position(&mut self, session: &PlaybackSession) {
        if self.applied.loaded.is_none() || session.load_error.is_some() {
            return;
        }

        let drift = (session.current_time - self.device.position()).abs();
        if drift > self.seek_tolerance {
            debug!(position = session.current_time, drift, "Pushing seek to device");
            self.device.seek(session.current_time).await;
        }
    }

    async fn sync_transport(&mut self, session: &PlaybackSession) {
        if self.applied.loaded.is_none() || session.is_playing == self.applied.playing {
            return;
        }

        if !session.is_playing {
            self.device.pause().await;
            self.applied.playing = false;
            return;
        }

        match self.device.play().await {
            Ok(()) => self.applied.playing = true,
            Err(DeviceError::PlaybackRejected) => {
                self.applied.playing = false;
                self.with_orchestrator(AudioOrchestrator::report_play_rejected);
            }
            Err(e) => {
                warn!(error = %e, "Device refused to play");
                self.applied.playing = false;
                self.with_orchestrator(AudioOrchestrator::report_play_rejected);
            }
        }
    }

    /// Returns `false` once the orchestrator is gone.
    fn handle_event(&mut self, SourceEvent { source, event }: SourceEvent) -> bool {
        let Some(orchestrator) = self.orchestrator.upgrade() else {
            return false;
        };

        // Reports from a source that has since been unloaded or replaced.
        if self.applied.loaded != Some(source) {
            trace!(?source, ?event, "Dropping event from previous source");
            return true;
        }

        match event {
            DeviceEvent::TimeUpdate(seconds) => {
                // Reports queued before a pushed seek no longer match the device.
                let stale = (seconds - self.device.position()).abs() > self.seek_tolerance;
                if !stale {
                    orchestrator.set_current_time(seconds);
                }
            }
            DeviceEvent::DurationKnown(seconds) => {
                orchestrator.set_duration(seconds);
            }
            DeviceEvent::Ended => {
                debug!("Source ended");
                self.applied.playing = false;
                orchestrator.pause();
            }
            DeviceEvent::PlayRejected => {
                self.applied.playing = false;
                orchestrator.report_play_rejected();
            }
            DeviceEvent::LoadFailed(reason) => {
                self.applied.playing = false;
                orchestrator.report_load_failure(&reason);
            }
        }

        true
    }

    fn with_orchestrator(&self, apply: impl FnOnce(&AudioOrchestrator)) {
        if let Some(orchestrator) = self.orchestrator.upgrade() {
            apply(&orchestrator);
        }
    }
}
