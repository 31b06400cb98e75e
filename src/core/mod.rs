use std::path::Path;

use thiserror::Error;

/// Error types for the lingoplay application.
///
/// Covers configuration loading and validation, and persistence of
/// player preferences. Playback itself never fails with these; see
/// [`crate::services::playback::PlaybackError`].
#[derive(Error, Debug)]
pub enum LingoplayError {
    /// Configuration validation error
    #[error("configuration validation failed for '{component}': {details}")]
    ConfigValidation {
        /// Component that failed validation
        component: String,
        /// Validation error details
        details: String,
    },

    /// Configuration field missing or invalid
    #[error("invalid config field '{field}' in {component}: {reason}")]
    InvalidConfigField {
        /// The field that is invalid
        field: String,
        /// Component containing the field
        component: String,
        /// Reason why the field is invalid
        reason: String,
    },

    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: std::path::PathBuf,
        /// I/O error details
        details: String,
    },

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// Serialization of persisted state failed
    #[error("failed to serialize {what}: {details}")]
    Serialization {
        /// What was being serialized
        what: String,
        /// Serializer error details
        details: String,
    },

    /// Home or config directory could not be determined
    #[error("cannot locate {0}: neither XDG_CONFIG_HOME nor HOME is set")]
    MissingHome(&'static str),
}

/// A specialized `Result` type for lingoplay operations.
pub type Result<T> = std::result::Result<T, LingoplayError>;

impl LingoplayError {
    /// Creates a TOML parsing error with optional file path context.
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        LingoplayError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error that names the path involved.
    pub fn io(error: impl std::fmt::Display, path: &Path) -> Self {
        LingoplayError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }

    /// Creates an invalid field error for a config section.
    pub fn invalid_field(
        component: &str,
        field: &str,
        reason: impl Into<String>,
    ) -> Self {
        LingoplayError::InvalidConfigField {
            field: field.to_string(),
            component: component.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_parse_without_path_reports_string_location() {
        let error = LingoplayError::toml_parse("expected `=`", None);

        assert_eq!(
            error.to_string(),
            "failed to parse TOML at 'string': expected `=`"
        );
    }

    #[test]
    fn invalid_field_names_component_and_field() {
        let error = LingoplayError::invalid_field("player", "default_volume", "must be in 0..=1");

        assert_eq!(
            error.to_string(),
            "invalid config field 'default_volume' in player: must be in 0..=1"
        );
    }
}
