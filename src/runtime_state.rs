use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

use crate::config::{ConfigPaths, PlayerConfig};
use crate::services::playback::{
    AudioOrchestrator, PlaybackSession, PlaybackSpeed, PlayerMode, Volume,
};
use crate::{LingoplayError, Result};

/// Player settings that persist between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPreferences {
    /// Output level before mute
    pub volume: Volume,

    /// Whether output was muted
    pub muted: bool,

    /// Playback rate
    pub speed: PlaybackSpeed,

    /// Last mode a session was shown in
    pub last_mode: Option<PlayerMode>,

    /// Last time these preferences were saved
    pub last_updated: DateTime<Utc>,
}

impl Default for PlayerPreferences {
    fn default() -> Self {
        Self::from_config(&PlayerConfig::default())
    }
}

impl PlayerPreferences {
    /// Starting preferences taken from the configuration
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            volume: config.volume(),
            muted: false,
            speed: config.speed(),
            last_mode: None,
            last_updated: Utc::now(),
        }
    }

    /// Capture the preferences held by a session
    pub fn from_session(session: &PlaybackSession) -> Self {
        Self {
            volume: session.volume,
            muted: session.is_muted,
            speed: session.speed,
            last_mode: Some(session.last_mode),
            last_updated: Utc::now(),
        }
    }

    /// Apply these preferences to the orchestrator
    pub fn apply(&self, orchestrator: &AudioOrchestrator) {
        orchestrator.restore_preferences(self.volume, self.muted, self.speed, self.last_mode);
    }

    /// Load preferences from the default location
    ///
    /// # Errors
    /// Returns error if the data directory cannot be determined or the
    /// file cannot be read
    pub async fn load(config: &PlayerConfig) -> Result<Self> {
        Self::load_from(&ConfigPaths::preferences_file()?, config).await
    }

    /// Load preferences from `path`, or start from `config` when absent.
    ///
    /// An unreadable or corrupt file is replaced by defaults with a warning.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read
    #[instrument(skip(config))]
    pub async fn load_from(path: &Path, config: &PlayerConfig) -> Result<Self> {
        if !fs::try_exists(path).await.unwrap_or(false) {
            info!("No saved preferences, using configured defaults");
            return Ok(Self::from_config(config));
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| LingoplayError::io(e, path))?;

        Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(error = %e, "Invalid preferences file, using configured defaults");
            Self::from_config(config)
        }))
    }

    /// Save preferences to the default location
    ///
    /// # Errors
    /// Returns error if the file cannot be written
    pub async fn save(&self) -> Result<()> {
        self.save_to(&ConfigPaths::preferences_file()?).await
    }

    /// Save preferences to `path`, creating parent directories
    ///
    /// # Errors
    /// Returns error if the file or its directory cannot be written
    #[instrument(skip(self))]
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| LingoplayError::io(e, parent))?;
        }

        let content =
            serde_json::to_string_pretty(self).map_err(|e| LingoplayError::Serialization {
                what: "player preferences".to_string(),
                details: e.to_string(),
            })?;
        fs::write(path, content)
            .await
            .map_err(|e| LingoplayError::io(e, path))?;

        debug!("Preferences saved");
        Ok(())
    }
}
