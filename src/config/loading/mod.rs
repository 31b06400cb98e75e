mod file_creation;

use std::{fs, path::Path};

use file_creation::create_default_config_file;
use tracing::{debug, instrument};

use super::Config;
use crate::{LingoplayError, Result};

impl Config {
    /// Loads and validates the configuration file at `path`.
    ///
    /// A missing file is created with the default configuration first.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be created or read
    /// - The TOML content is invalid
    /// - Any field fails validation
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use lingoplay::config::{Config, ConfigPaths};
    ///
    /// let config = Config::load(&ConfigPaths::main_config()?)?;
    /// # Ok::<(), lingoplay::LingoplayError>(())
    /// ```
    #[instrument]
    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            debug!("No config file found, writing defaults");
            create_default_config_file(path)?;
        }

        let content = fs::read_to_string(path).map_err(|e| LingoplayError::io(e, path))?;
        Self::parse(&content, Some(path))
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// `path` only labels errors.
    ///
    /// # Errors
    /// Returns an error if the TOML is invalid or a field fails validation.
    pub fn parse(content: &str, path: Option<&Path>) -> Result<Config> {
        let config: Config =
            toml::from_str(content).map_err(|e| LingoplayError::toml_parse(e, path))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every section.
    ///
    /// # Errors
    /// Returns the first validation failure found.
    pub fn validate(&self) -> Result<()> {
        self.player.validate()?;
        self.routes.router()?;
        Ok(())
    }

    /// Serializes the configuration back to TOML.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| LingoplayError::Serialization {
            what: "configuration".to_string(),
            details: e.to_string(),
        })
    }

    /// JSON schema of the configuration file.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be serialized.
    pub fn schema() -> Result<String> {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema).map_err(|e| LingoplayError::Serialization {
            what: "configuration schema".to_string(),
            details: e.to_string(),
        })
    }
}
