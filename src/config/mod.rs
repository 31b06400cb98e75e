//! Configuration schema definitions and validation.
//!
//! Defines the TOML configuration for lingoplay: logging, player
//! behavior and route rules for the presentation surfaces.

mod general;
mod loading;
mod paths;
mod player;
mod routes;

pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;
pub use player::PlayerConfig;
pub use routes::RouteConfig;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// Main configuration structure for lingoplay.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Player behavior and defaults.
    #[serde(default)]
    pub player: PlayerConfig,

    /// Route rules deciding which surface is visible.
    #[serde(default)]
    pub routes: RouteConfig,
}
