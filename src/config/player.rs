use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::services::playback::{OrchestratorOptions, PlaybackSpeed, PlayerMode, Volume};
use crate::{LingoplayError, Result};

const COMPONENT: &str = "player";

/// Player behavior and starting values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PlayerConfig {
    /// Mode a new session opens in (`full`, `compact` or `minimized`).
    pub default_mode: PlayerMode,

    /// Reopen in the last mode used instead of `default_mode`.
    pub remember_mode: bool,

    /// Starting volume in `0.0..=1.0`.
    pub default_volume: f64,

    /// Starting playback rate; one of 0.75, 1, 1.25, 1.5 or 2.
    pub default_speed: f64,

    /// Drift in seconds between session and device treated as a seek.
    pub seek_tolerance_secs: f64,

    /// Save volume, mute and speed between runs.
    pub remember_preferences: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            default_mode: PlayerMode::Full,
            remember_mode: true,
            default_volume: 1.0,
            default_speed: 1.0,
            seek_tolerance_secs: 0.5,
            remember_preferences: true,
        }
    }
}

impl PlayerConfig {
    /// Check every field against its allowed range.
    ///
    /// # Errors
    /// Returns [`LingoplayError::InvalidConfigField`] for the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.default_mode.is_closed() {
            return Err(LingoplayError::invalid_field(
                COMPONENT,
                "default_mode",
                "a session cannot open closed",
            ));
        }

        if !(0.0..=1.0).contains(&self.default_volume) {
            return Err(LingoplayError::invalid_field(
                COMPONENT,
                "default_volume",
                format!("{} is outside 0.0..=1.0", self.default_volume),
            ));
        }

        PlaybackSpeed::try_from(self.default_speed)
            .map_err(|e| LingoplayError::invalid_field(COMPONENT, "default_speed", e.to_string()))?;

        if !self.seek_tolerance_secs.is_finite() || self.seek_tolerance_secs < 0.0 {
            return Err(LingoplayError::invalid_field(
                COMPONENT,
                "seek_tolerance_secs",
                "must be a non-negative number of seconds",
            ));
        }

        Ok(())
    }

    /// Starting volume
    pub fn volume(&self) -> Volume {
        Volume::new(self.default_volume)
    }

    /// Starting speed, falling back to normal for unvalidated values
    pub fn speed(&self) -> PlaybackSpeed {
        PlaybackSpeed::try_from(self.default_speed).unwrap_or_default()
    }
}

impl From<&PlayerConfig> for OrchestratorOptions {
    fn from(config: &PlayerConfig) -> Self {
        Self {
            default_mode: config.default_mode,
            remember_mode: config.remember_mode,
        }
    }
}
