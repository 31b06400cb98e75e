use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::Result;
use crate::config::Config;
use crate::services::playback::surfaces::SurfaceRouter;
use crate::services::playback::{
    AudioOrchestrator, DeviceSync, MemoryDevice, OrchestratorOptions,
};

const SETTLE_ROUNDS: usize = 100;

/// Everything the REPL commands operate on.
///
/// One orchestrator bound to one simulated device, plus the route the
/// host is currently showing.
pub struct SessionContext {
    /// Owner of the playback session
    pub orchestrator: Arc<AudioOrchestrator>,
    /// Simulated output device
    pub device: Arc<MemoryDevice>,
    /// Loaded configuration
    pub config: Config,
    router: SurfaceRouter,
    route: Mutex<String>,
    sync: DeviceSync,
}

impl SessionContext {
    /// Build the orchestrator, bind `device` to it and start on `route`.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns an error if the configured route patterns do not compile.
    pub fn new(config: Config, device: MemoryDevice, route: impl Into<String>) -> Result<Self> {
        let router = config.routes.router()?;
        let orchestrator = Arc::new(AudioOrchestrator::new(OrchestratorOptions::from(
            &config.player,
        )));
        orchestrator.set_volume(*config.player.volume());
        orchestrator.set_speed(config.player.speed());

        let device = Arc::new(device);
        let sync = DeviceSync::start(
            &orchestrator,
            device.clone(),
            config.player.seek_tolerance_secs,
        );

        Ok(Self {
            orchestrator,
            device,
            config,
            router,
            route: Mutex::new(route.into()),
            sync,
        })
    }

    /// Wait until the device has caught up with every committed change
    /// and every device event has been folded back into the session.
    pub async fn settle(&self) {
        for _ in 0..SETTLE_ROUNDS {
            if self.is_settled() {
                return;
            }
            tokio::task::yield_now().await;
        }

        if !self.is_settled() {
            warn!(rounds = SETTLE_ROUNDS, "Device sync still busy");
        }
    }

    fn is_settled(&self) -> bool {
        self.sync.processed_revision() == Some(self.orchestrator.revision())
            && self.device.pending_events() == 0
    }

    /// Route the host is showing
    pub fn route(&self) -> String {
        self.route_guard().clone()
    }

    /// Navigate to `route`
    pub fn set_route(&self, route: impl Into<String>) {
        let route = route.into();
        debug!(%route, "Navigated");
        *self.route_guard() = route;
    }

    /// Router deciding which surface is visible
    pub fn router(&self) -> &SurfaceRouter {
        &self.router
    }

    /// What the user currently sees on the active route
    pub fn render(&self) -> String {
        self.router
            .render(&self.orchestrator.snapshot(), &self.route())
    }

    /// Stop the sync task. The session is left as is.
    pub fn shutdown(&self) {
        self.sync.shutdown();
    }

    fn route_guard(&self) -> MutexGuard<'_, String> {
        self.route.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
