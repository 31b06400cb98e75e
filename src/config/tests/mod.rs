//! Unit tests for config module
//!
//! Tests configuration types, defaults, validation and serialization.
//! No filesystem dependencies - all in-memory.

#![allow(clippy::panic, clippy::unwrap_used)]

use crate::LingoplayError;
use crate::config::{Config, LogLevel, PlayerConfig, RouteConfig};
use crate::services::playback::{OrchestratorOptions, PlaybackSpeed, PlayerMode};

#[test]
fn config_default_is_valid() {
    let config = Config::default();

    config.validate().unwrap();
    assert_eq!(config.general.log_level, LogLevel::Info);
    assert_eq!(config.player.default_mode, PlayerMode::Full);
    assert!(config.player.remember_mode);
}

#[test]
fn config_serialize_toml() {
    let toml_str = Config::default().to_toml().unwrap();

    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[player]"));
    assert!(toml_str.contains("[routes]"));
    assert!(toml_str.contains("default_mode = \"full\""));
}

#[test]
fn config_serialize_roundtrip() {
    let original = Config::default();

    let parsed = Config::parse(&original.to_toml().unwrap(), None).unwrap();

    assert_eq!(parsed, original);
}

#[test]
fn config_empty_toml_uses_defaults() {
    let config = Config::parse("", None).unwrap();

    assert_eq!(config, Config::default());
}

#[test]
fn config_partial_sections_keep_other_defaults() {
    let config = Config::parse(
        r#"
        [general]
        log_level = "debug"

        [player]
        default_mode = "compact"
        default_speed = 1.25
    "#,
        None,
    )
    .unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.player.default_mode, PlayerMode::Compact);
    assert_eq!(config.player.speed(), PlaybackSpeed::Quick);
    assert_eq!(config.player.default_volume, 1.0);
    assert_eq!(config.routes, RouteConfig::default());
}

#[test]
fn config_invalid_toml_reports_location() {
    let error = Config::parse("[player\n", None).unwrap_err();

    match error {
        LingoplayError::TomlParseError { location, .. } => assert_eq!(location, "string"),
        other => panic!("expected TOML parse error, got {other:?}"),
    }
}

#[test]
fn config_unknown_mode_fails_to_parse() {
    assert!(Config::parse("[player]\ndefault_mode = \"sidebar\"\n", None).is_err());
}

fn invalid_field(error: LingoplayError) -> String {
    match error {
        LingoplayError::InvalidConfigField { field, .. } => field,
        other => panic!("expected invalid field error, got {other:?}"),
    }
}

#[test]
fn player_rejects_closed_default_mode() {
    let player = PlayerConfig {
        default_mode: PlayerMode::Closed,
        ..PlayerConfig::default()
    };

    assert_eq!(invalid_field(player.validate().unwrap_err()), "default_mode");
}

#[test]
fn player_rejects_volume_out_of_range() {
    let player = PlayerConfig {
        default_volume: 1.5,
        ..PlayerConfig::default()
    };

    assert_eq!(invalid_field(player.validate().unwrap_err()), "default_volume");
}

#[test]
fn player_rejects_speed_outside_offered_rates() {
    let error = Config::parse("[player]\ndefault_speed = 1.1\n", None).unwrap_err();

    assert_eq!(invalid_field(error), "default_speed");
}

#[test]
fn player_rejects_negative_tolerance() {
    let player = PlayerConfig {
        seek_tolerance_secs: -1.0,
        ..PlayerConfig::default()
    };

    assert_eq!(invalid_field(player.validate().unwrap_err()), "seek_tolerance_secs");
}

#[test]
fn player_config_maps_to_orchestrator_options() {
    let player = PlayerConfig {
        default_mode: PlayerMode::Minimized,
        remember_mode: false,
        ..PlayerConfig::default()
    };

    let options = OrchestratorOptions::from(&player);

    assert_eq!(options.default_mode, PlayerMode::Minimized);
    assert!(!options.remember_mode);
}

#[test]
fn routes_build_router() {
    let router = RouteConfig::default().router().unwrap();

    assert!(router.is_listening_route("/listening/lesson-3"));
    assert!(router.is_hidden_route("/auth/login"));
    assert!(!router.is_hidden_route("/home"));
}

#[test]
fn routes_reject_bad_pattern() {
    let routes = RouteConfig {
        listening: vec![],
        hidden: vec!["[unclosed".to_string()],
    };

    assert_eq!(invalid_field(routes.router().unwrap_err()), "hidden");
}

#[test]
fn schema_describes_sections() {
    let schema = Config::schema().unwrap();

    assert!(schema.contains("\"player\""));
    assert!(schema.contains("\"routes\""));
    assert!(schema.contains("seek_tolerance_secs"));
}
