mod log_level;

pub use log_level::LogLevel;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Settings that are not specific to the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct GeneralConfig {
    /// Default logging level when `RUST_LOG` is unset.
    #[serde(default)]
    pub log_level: LogLevel,
}
