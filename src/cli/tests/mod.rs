//! Unit tests for CLI module
//!
//! Drives the command service against a simulated device, the same way
//! the REPL does.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::sync::Arc;

use crate::cli::commands::player::SeekCommand;
use crate::cli::{CliError, CliService, LineOutcome, SessionContext};
use crate::config::Config;
use crate::services::playback::{AudioDevice, MemoryDevice, PlayerMode};

fn start() -> (CliService, Arc<SessionContext>) {
    let device = MemoryDevice::new().with_default_duration(120.0);
    let context = Arc::new(SessionContext::new(Config::default(), device, "/").unwrap());
    (CliService::new(context.clone()), context)
}

async fn run(service: &CliService, line: &str) -> String {
    match service.execute_line(line).await.unwrap() {
        LineOutcome::Output(text) => text,
        LineOutcome::Quit => panic!("unexpected quit for '{line}'"),
    }
}

#[tokio::test]
async fn registry_lists_every_category() {
    let (service, _context) = start();

    let categories: Vec<String> = service.list_all().into_iter().map(|(c, _)| c).collect();

    assert_eq!(categories, vec!["config", "device", "player", "ui"]);
    let player = service
        .list_all()
        .into_iter()
        .find(|(category, _)| category == "player")
        .unwrap()
        .1;
    assert!(player.contains(&"play".to_string()));
    assert!(player.contains(&"seek".to_string()));
}

#[tokio::test]
async fn play_starts_and_reaches_device() {
    let (service, context) = start();

    let output = run(&service, "player play https://cdn.example/a.mp3 \"Lesson A\"").await;

    assert_eq!(output, "Playing \"Lesson A\"");
    assert!(context.device.is_playing());
    let status = run(&service, "player status").await;
    assert!(status.contains("state: playing"));
    assert!(status.contains("position: 0:00 / 2:00"));
}

#[tokio::test]
async fn player_category_is_optional() {
    let (service, context) = start();
    run(&service, "play https://cdn.example/a.mp3").await;

    run(&service, "pause").await;

    assert!(!context.orchestrator.snapshot().is_playing);
    assert!(!context.device.is_playing());
}

#[tokio::test]
async fn switching_tracks_asks_first() {
    let (service, context) = start();
    run(&service, "play https://cdn.example/a.mp3 A").await;

    let prompt = run(&service, "play https://cdn.example/b.mp3 B").await;
    assert_eq!(prompt, "\"A\" is playing. Switch to \"B\"? (confirm / cancel)");
    assert_eq!(
        context.device.source().as_deref(),
        Some("https://cdn.example/a.mp3")
    );

    assert_eq!(run(&service, "confirm").await, "Playing \"B\"");
    assert_eq!(
        context.device.source().as_deref(),
        Some("https://cdn.example/b.mp3")
    );
    assert_eq!(run(&service, "cancel").await, "No track change is waiting");
}

#[tokio::test]
async fn blocked_autoplay_is_reported_as_paused() {
    let (service, _context) = start();
    run(&service, "device reject on").await;

    let output = run(&service, "play https://cdn.example/a.mp3 A").await;

    assert_eq!(output, "Paused \"A\"");
}

#[tokio::test]
async fn tick_moves_session_clock() {
    let (service, context) = start();
    run(&service, "play https://cdn.example/a.mp3").await;

    assert_eq!(run(&service, "device tick 15").await, "0:15 / 2:00");
    assert_eq!(context.orchestrator.snapshot().current_time, 15.0);
}

#[tokio::test]
async fn seek_accepts_every_format() {
    let (service, context) = start();
    run(&service, "play https://cdn.example/a.mp3").await;

    assert_eq!(run(&service, "seek 1:30").await, "Seeked to 1:30");
    assert_eq!(run(&service, "seek -100").await, "Seeked to 0:00");
    assert_eq!(run(&service, "seek 50%").await, "Seeked to 1:00");
    assert_eq!(run(&service, "seek 500").await, "Seeked to 2:00");
    assert_eq!(context.device.position(), 120.0);
}

#[tokio::test]
async fn seek_without_session_fails() {
    let (service, _context) = start();

    let error = service.execute_line("seek 10").await.unwrap_err();

    assert!(matches!(error, CliError::NoActiveSession));
}

#[test]
fn parse_position_formats() {
    assert_eq!(SeekCommand::parse_position("30", 0.0, 0.0).unwrap(), 30.0);
    assert_eq!(SeekCommand::parse_position("1:30", 0.0, 0.0).unwrap(), 90.0);
    assert_eq!(SeekCommand::parse_position("25%", 0.0, 200.0).unwrap(), 50.0);
    assert_eq!(SeekCommand::parse_position("+10", 5.0, 0.0).unwrap(), 15.0);
    assert_eq!(SeekCommand::parse_position("-10", 5.0, 0.0).unwrap(), -5.0);

    assert!(SeekCommand::parse_position("50%", 0.0, 0.0).is_err());
    assert!(SeekCommand::parse_position("1:75", 0.0, 0.0).is_err());
    assert!(SeekCommand::parse_position("soon", 0.0, 0.0).is_err());
    assert!(SeekCommand::parse_position("+inf", 5.0, 0.0).is_err());
    assert!(SeekCommand::parse_position("-NaN", 5.0, 0.0).is_err());
    assert!(SeekCommand::parse_position("inf", 5.0, 0.0).is_err());
}

#[tokio::test]
async fn listening_route_hides_full_player() {
    let (service, context) = start();
    run(&service, "play https://cdn.example/a.mp3 A").await;

    run(&service, "ui route /listening/3").await;
    assert_eq!(run(&service, "ui render").await, "(no player shown)");

    run(&service, "minimize").await;
    assert_eq!(context.orchestrator.snapshot().mode, PlayerMode::Compact);
    assert!(run(&service, "ui render").await.contains("A  0:00 / 2:00"));
}

#[tokio::test]
async fn output_commands_validate_values() {
    let (service, context) = start();

    assert_eq!(run(&service, "volume 40").await, "Volume 40%");
    assert_eq!(run(&service, "mute").await, "Muted");
    assert_eq!(run(&service, "speed 1.5").await, "Speed 1.5x");
    assert_eq!(run(&service, "speed").await, "Speed 2x");

    assert!(service.execute_line("volume 150").await.is_err());
    assert!(service.execute_line("speed 3").await.is_err());

    let session = context.orchestrator.snapshot();
    assert!(session.is_muted);
    assert_eq!(session.effective_volume(), 0.0);
}

#[tokio::test]
async fn unknown_commands_and_bad_arity_are_rejected() {
    let (service, _context) = start();

    assert!(matches!(
        service.execute_line("player rewind").await.unwrap_err(),
        CliError::CommandNotFound(_)
    ));
    assert!(matches!(
        service.execute_line("player close now").await.unwrap_err(),
        CliError::InvalidArguments(_)
    ));
}

#[tokio::test]
async fn help_and_quit() {
    let (service, _context) = start();

    let help = run(&service, "help").await;
    assert!(help.contains("player"));
    assert!(help.contains("device"));
    assert!(run(&service, "help device").await.contains("tick"));
    assert!(run(&service, "  # comment").await.is_empty());

    assert_eq!(service.execute_line("quit").await.unwrap(), LineOutcome::Quit);
}

#[tokio::test]
async fn config_show_prints_toml() {
    let (service, _context) = start();

    let toml = run(&service, "config show").await;

    assert!(toml.contains("[player]"));
    assert!(toml.contains("remember_mode = true"));
}
