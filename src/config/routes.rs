use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::services::playback::surfaces::SurfaceRouter;
use crate::{LingoplayError, Result};

/// Route patterns that change which surface is shown.
///
/// Patterns are regular expressions matched against the host's current
/// route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RouteConfig {
    /// Dedicated listening pages; the full player is suppressed there.
    pub listening: Vec<String>,

    /// Pages where no player surface is shown.
    pub hidden: Vec<String>,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            listening: vec!["^/listening(/.*)?$".to_string()],
            hidden: vec!["^/auth(/.*)?$".to_string()],
        }
    }
}

impl RouteConfig {
    /// Compile the patterns into a router.
    ///
    /// # Errors
    /// Returns [`LingoplayError::InvalidConfigField`] naming the list that
    /// holds a pattern which does not compile.
    pub fn router(&self) -> Result<SurfaceRouter> {
        let listening = compile("listening", &self.listening)?;
        let hidden = compile("hidden", &self.hidden)?;
        Ok(SurfaceRouter::new(listening, hidden))
    }
}

fn compile(field: &str, patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|e| {
                LingoplayError::invalid_field(
                    "routes",
                    field,
                    format!("pattern '{pattern}' does not compile: {e}"),
                )
            })
        })
        .collect()
}
