use std::{env, fs, path::PathBuf};

use crate::{LingoplayError, Result};

/// Locations of configuration, state and log files.
///
/// Configuration follows the XDG Base Directory layout; state and logs
/// live under `~/.lingoplay`.
pub struct ConfigPaths;

impl ConfigPaths {
    /// Returns the configuration directory path for the application
    ///
    /// Checks `XDG_CONFIG_HOME` first, then falls back to `$HOME/.config`.
    ///
    /// # Errors
    /// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set
    pub fn config_dir() -> Result<PathBuf> {
        let config_home = env::var("XDG_CONFIG_HOME")
            .or_else(|_| env::var("HOME").map(|home| format!("{home}/.config")))
            .map_err(|_| LingoplayError::MissingHome("config directory"))?;

        Ok(PathBuf::from(config_home).join("lingoplay"))
    }

    /// Returns the application data directory, creating it if needed
    ///
    /// # Errors
    /// Returns an error if `HOME` is not set or the directory cannot be created
    pub fn app_data_dir() -> Result<PathBuf> {
        let home = env::var("HOME").map_err(|_| LingoplayError::MissingHome("data directory"))?;
        let app_dir = PathBuf::from(home).join(".lingoplay");

        if !app_dir.exists() {
            fs::create_dir_all(&app_dir).map_err(|e| LingoplayError::io(e, &app_dir))?;
        }

        Ok(app_dir)
    }

    /// Returns the log directory, creating it if needed
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created
    pub fn log_dir() -> Result<PathBuf> {
        let log_dir = Self::app_data_dir()?.join("logs");

        if !log_dir.exists() {
            fs::create_dir_all(&log_dir).map_err(|e| LingoplayError::io(e, &log_dir))?;
        }

        Ok(log_dir)
    }

    /// Returns the path to the main configuration file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined
    pub fn main_config() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the saved player preferences
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be determined
    pub fn preferences_file() -> Result<PathBuf> {
        Ok(Self::app_data_dir()?.join("preferences.json"))
    }
}
