//! Unit tests for the playback service
//!
//! Orchestrator transitions are tested synchronously against the store.
//! Device sync and surfaces live in their own submodules.

#![allow(clippy::unwrap_used)]


use crate::services::playback::{
    AudioOrchestrator, OrchestratorOptions, PlayOutcome, PlaybackSession, PlaybackSpeed,
    PlayerMode, Track, TrackMetadata, Volume,
};

fn lesson(n: u32) -> Track {
    Track::new(format!("https://cdn.example/lesson-{n}.mp3")).with_title(format!("Lesson {n}"))
}

fn assert_invariants(session: &PlaybackSession) {
    assert_eq!(
        session.mode == PlayerMode::Closed,
        session.audio_url.is_none(),
        "closed mode must match missing session: {session:?}"
    );
    assert_eq!(
        session.pending_audio.is_some(),
        session.show_change_confirm,
        "pending audio must match prompt visibility: {session:?}"
    );
    if session.duration > 0.0 {
        assert!(
            (0.0..=session.duration).contains(&session.current_time),
            "position outside track: {session:?}"
        );
    }
}

mod requests {
    use super::*;

    #[test]
    fn first_request_starts_session_in_full_mode() {
        let orchestrator = AudioOrchestrator::default();

        let outcome = orchestrator.request_play(lesson(1));

        let session = orchestrator.snapshot();
        assert_eq!(outcome, PlayOutcome::Started);
        assert_eq!(session.audio_url.as_deref(), Some("https://cdn.example/lesson-1.mp3"));
        assert_eq!(session.title.as_deref(), Some("Lesson 1"));
        assert!(session.is_playing);
        assert!(session.is_loading);
        assert_eq!(session.mode, PlayerMode::Full);
        assert_eq!(session.current_time, 0.0);
        assert_eq!(session.duration, 0.0);
        assert_invariants(&session);
    }

    #[test]
    fn different_track_waits_for_confirmation() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.request_play(lesson(1));

        let outcome = orchestrator.request_play(lesson(2));

        let session = orchestrator.snapshot();
        assert_eq!(outcome, PlayOutcome::AwaitingConfirmation);
        assert_eq!(session.audio_url.as_deref(), Some("https://cdn.example/lesson-1.mp3"));
        assert_eq!(session.pending_audio, Some(lesson(2)));
        assert!(session.show_change_confirm);
        assert!(session.is_playing);
        assert_invariants(&session);
    }

    #[test]
    fn same_track_resumes_without_prompt() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.request_play(lesson(1));
        orchestrator.pause();

        let outcome = orchestrator.request_play(lesson(1));

        let session = orchestrator.snapshot();
        assert_eq!(outcome, PlayOutcome::Resumed);
        assert!(session.pending_audio.is_none());
        assert!(!session.show_change_confirm);
        assert!(session.is_playing);
    }

    #[test]
    fn latest_pending_request_wins() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.request_play(lesson(1));
        orchestrator.request_play(lesson(2));

        orchestrator.request_play(lesson(3));

        assert_eq!(orchestrator.snapshot().pending_audio, Some(lesson(3)));
    }

    #[test]
    fn confirm_replaces_session_and_resets_position() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.request_play(lesson(1));
        orchestrator.set_duration(300.0);
        orchestrator.seek(95.0);
        orchestrator.request_play(lesson(2));

        assert!(orchestrator.confirm_audio_change());

        let session = orchestrator.snapshot();
        assert_eq!(session.audio_url.as_deref(), Some("https://cdn.example/lesson-2.mp3"));
        assert_eq!(session.title.as_deref(), Some("Lesson 2"));
        assert!(session.pending_audio.is_none());
        assert!(!session.show_change_confirm);
        assert_eq!(session.current_time, 0.0);
        assert_eq!(session.duration, 0.0);
        assert!(session.is_playing);
        assert_invariants(&session);
    }

    #[test]
    fn cancel_keeps_current_session() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.request_play(lesson(1));
        orchestrator.request_play(lesson(2));

        assert!(orchestrator.cancel_audio_change());

        let session = orchestrator.snapshot();
        assert_eq!(session.audio_url.as_deref(), Some("https://cdn.example/lesson-1.mp3"));
        assert!(session.pending_audio.is_none());
        assert!(!session.show_change_confirm);
        assert_invariants(&session);
    }

    #[test]
    fn confirm_and_cancel_without_pending_are_noops() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.request_play(lesson(1));
        let before = orchestrator.snapshot();

        assert!(!orchestrator.confirm_audio_change());
        assert!(!orchestrator.cancel_audio_change());
        assert!(!orchestrator.confirm_audio_change());

        assert_eq!(orchestrator.snapshot(), before);
    }

    #[test]
    fn metadata_travels_with_the_track() {
        let orchestrator = AudioOrchestrator::default();
        let metadata = TrackMetadata::new().with("level", "B1").with("unit", "4");

        orchestrator.request_play(lesson(1).with_metadata(metadata.clone()));

        assert_eq!(orchestrator.snapshot().metadata, metadata);
    }
}

mod transport {
    use super::*;

    #[test]
    fn pause_is_idempotent() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.request_play(lesson(1));

        orchestrator.pause();
        assert!(!orchestrator.snapshot().is_playing);
        let revision = orchestrator.revision();

        orchestrator.pause();
        assert!(!orchestrator.snapshot().is_playing);
        assert_eq!(orchestrator.revision(), revision);
    }

    #[test]
    fn toggle_flips_play_state() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.request_play(lesson(1));

        assert!(!orchestrator.toggle_play());
        assert!(orchestrator.toggle_play());
    }

    #[test]
    fn toggle_without_session_does_nothing() {
        let orchestrator = AudioOrchestrator::default();

        assert!(!orchestrator.toggle_play());
        orchestrator.play();

        assert_eq!(orchestrator.snapshot(), AudioOrchestrator::default().snapshot());
    }

    #[test]
    fn seek_past_end_clamps_to_duration() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.request_play(lesson(1));
        orchestrator.set_duration(120.0);

        let position = orchestrator.seek(500.0);

        assert_eq!(position, 120.0);
        assert_eq!(orchestrator.snapshot().current_time, 120.0);
    }

    #[test]
    fn seek_before_start_clamps_to_zero() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.request_play(lesson(1));
        orchestrator.set_duration(120.0);
        orchestrator.seek(30.0);

        assert_eq!(orchestrator.skip(-45.0), 0.0);
    }

    #[test]
    fn seek_is_unbounded_above_until_duration_is_known() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.request_play(lesson(1));

        assert_eq!(orchestrator.seek(500.0), 500.0);
        assert_eq!(orchestrator.seek(-2.0), 0.0);
    }

    #[test]
    fn non_finite_seek_keeps_position_until_duration_is_known() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.request_play(lesson(1));
        orchestrator.seek(12.0);

        assert_eq!(orchestrator.seek(f64::INFINITY), 12.0);
        assert_eq!(orchestrator.seek(f64::NEG_INFINITY), 12.0);
        assert_eq!(orchestrator.seek(f64::NAN), 12.0);
        assert_eq!(orchestrator.skip(f64::INFINITY), 12.0);

        orchestrator.set_duration(90.0);

        assert_eq!(orchestrator.seek(f64::INFINITY), 90.0);
        assert_eq!(orchestrator.seek(f64::NAN), 90.0);
        assert_invariants(&orchestrator.snapshot());
    }

    #[test]
    fn skip_commits_once_relative_to_committed_position() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.request_play(lesson(1));
        orchestrator.set_duration(120.0);
        orchestrator.seek(100.0);
        let revision = orchestrator.revision();

        assert_eq!(orchestrator.skip(10.0), 110.0);
        assert_eq!(orchestrator.revision(), revision + 1);

        assert_eq!(orchestrator.skip(30.0), 120.0);
        assert_eq!(orchestrator.revision(), revision + 2);
    }

    #[test]
    fn skip_without_session_does_nothing() {
        let orchestrator = AudioOrchestrator::default();

        assert_eq!(orchestrator.skip(10.0), 0.0);
        assert_eq!(orchestrator.revision(), 0);
    }

    #[test]
    fn learning_duration_clamps_position_and_ends_loading() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.request_play(lesson(1));
        orchestrator.seek(500.0);

        orchestrator.set_duration(90.0);

        let session = orchestrator.snapshot();
        assert!(!session.is_loading);
        assert_eq!(session.current_time, 90.0);
        assert_invariants(&session);
    }

    #[test]
    fn device_time_is_ignored_without_session() {
        let orchestrator = AudioOrchestrator::default();

        orchestrator.set_current_time(12.0);
        orchestrator.set_duration(60.0);

        let session = orchestrator.snapshot();
        assert_eq!(session.current_time, 0.0);
        assert_eq!(session.duration, 0.0);
    }

    #[test]
    fn volume_is_clamped() {
        let orchestrator = AudioOrchestrator::default();

        orchestrator.set_volume(1.7);
        assert_eq!(*orchestrator.snapshot().volume, 1.0);

        orchestrator.set_volume(-0.3);
        assert_eq!(*orchestrator.snapshot().volume, 0.0);

        orchestrator.set_volume(f64::NAN);
        assert_eq!(*orchestrator.snapshot().volume, 0.0);
    }

    #[test]
    fn mute_silences_effective_volume_only() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.set_volume(0.6);

        assert!(orchestrator.toggle_mute());

        let session = orchestrator.snapshot();
        assert_eq!(*session.volume, 0.6);
        assert_eq!(session.effective_volume(), 0.0);

        orchestrator.set_muted(false);
        assert_eq!(orchestrator.snapshot().effective_volume(), 0.6);
    }

    #[test]
    fn speed_cycles_through_offered_rates() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.set_speed(PlaybackSpeed::Fast);

        assert_eq!(orchestrator.cycle_speed(), PlaybackSpeed::Double);
        assert_eq!(orchestrator.cycle_speed(), PlaybackSpeed::Slow);
        assert_eq!(orchestrator.cycle_speed(), PlaybackSpeed::Normal);
    }

    #[test]
    fn rejected_playback_reverts_to_paused() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.request_play(lesson(1));

        orchestrator.report_play_rejected();

        let session = orchestrator.snapshot();
        assert!(!session.is_playing);
        assert!(session.is_active());
    }

    #[test]
    fn load_failure_keeps_session_for_retry() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.request_play(lesson(1));
        let generation = orchestrator.snapshot().source_generation;

        orchestrator.report_load_failure("404");

        let session = orchestrator.snapshot();
        assert!(session.is_active());
        assert!(!session.is_playing);
        assert!(!session.is_loading);
        assert_eq!(session.load_error.as_deref(), Some("404"));
        assert_eq!(session.mode, PlayerMode::Full);

        assert_eq!(orchestrator.request_play(lesson(1)), PlayOutcome::Started);
        let retried = orchestrator.snapshot();
        assert!(retried.load_error.is_none());
        assert!(retried.is_playing);
        assert_eq!(retried.source_generation, generation + 1);
    }

    #[test]
    fn load_failure_without_session_is_ignored() {
        let orchestrator = AudioOrchestrator::default();

        orchestrator.report_load_failure("404");

        let session = orchestrator.snapshot();
        assert!(session.load_error.is_none());
        assert_eq!(orchestrator.revision(), 0);
    }
}

mod modes {
    use super::*;

    #[test]
    fn close_from_every_mode_destroys_session() {
        for mode in [PlayerMode::Full, PlayerMode::Compact, PlayerMode::Minimized] {
            let orchestrator = AudioOrchestrator::default();
            orchestrator.request_play(lesson(1));
            orchestrator.request_play(lesson(2));
            orchestrator.set_mode(mode);

            orchestrator.close();

            let session = orchestrator.snapshot();
            assert_eq!(session.mode, PlayerMode::Closed);
            assert!(session.audio_url.is_none());
            assert!(session.pending_audio.is_none());
            assert!(!session.is_playing);
            assert_invariants(&session);
        }
    }

    #[test]
    fn only_play_requests_leave_closed() {
        let orchestrator = AudioOrchestrator::default();

        assert_eq!(orchestrator.expand(), PlayerMode::Closed);
        assert_eq!(orchestrator.minimize(), PlayerMode::Closed);
        assert_eq!(orchestrator.set_mode(PlayerMode::Compact), PlayerMode::Closed);
        assert!(!orchestrator.confirm_audio_change());
        assert_eq!(orchestrator.snapshot().mode, PlayerMode::Closed);

        orchestrator.request_play(lesson(1));
        assert_ne!(orchestrator.snapshot().mode, PlayerMode::Closed);
    }

    #[test]
    fn expand_and_minimize_step_one_surface_at_a_time() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.request_play(lesson(1));

        assert_eq!(orchestrator.minimize(), PlayerMode::Compact);
        assert_eq!(orchestrator.minimize(), PlayerMode::Minimized);
        assert_eq!(orchestrator.minimize(), PlayerMode::Minimized);
        assert_eq!(orchestrator.expand(), PlayerMode::Compact);
        assert_eq!(orchestrator.expand(), PlayerMode::Full);
        assert_eq!(orchestrator.expand(), PlayerMode::Full);
    }

    #[test]
    fn preferences_survive_close() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.request_play(lesson(1));
        orchestrator.set_volume(0.3);
        orchestrator.set_speed(PlaybackSpeed::Quick);

        orchestrator.close();

        let session = orchestrator.snapshot();
        assert_eq!(session.volume, Volume::new(0.3));
        assert_eq!(session.speed, PlaybackSpeed::Quick);
    }

    #[test]
    fn reopens_in_last_mode_when_remembering() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.request_play(lesson(1));
        orchestrator.minimize();
        orchestrator.minimize();
        orchestrator.close();

        orchestrator.request_play(lesson(2));

        assert_eq!(orchestrator.snapshot().mode, PlayerMode::Minimized);
    }

    #[test]
    fn reopens_in_default_mode_when_not_remembering() {
        let orchestrator = AudioOrchestrator::new(OrchestratorOptions {
            default_mode: PlayerMode::Compact,
            remember_mode: false,
        });
        orchestrator.request_play(lesson(1));
        orchestrator.minimize();
        orchestrator.close();

        orchestrator.request_play(lesson(2));

        assert_eq!(orchestrator.snapshot().mode, PlayerMode::Compact);
    }

    #[test]
    fn closed_default_mode_falls_back_to_full() {
        let orchestrator = AudioOrchestrator::new(OrchestratorOptions {
            default_mode: PlayerMode::Closed,
            remember_mode: false,
        });

        orchestrator.request_play(lesson(1));

        assert_eq!(orchestrator.snapshot().mode, PlayerMode::Full);
    }

    #[test]
    fn restored_preferences_apply_to_next_session() {
        let orchestrator = AudioOrchestrator::default();
        orchestrator.restore_preferences(
            Volume::new(0.5),
            true,
            PlaybackSpeed::Slow,
            Some(PlayerMode::Compact),
        );

        orchestrator.request_play(lesson(1));

        let session = orchestrator.snapshot();
        assert_eq!(session.mode, PlayerMode::Compact);
        assert!(session.is_muted);
        assert_eq!(session.speed, PlaybackSpeed::Slow);
    }
}

mod invariants {
    use super::*;

    #[test]
    fn hold_across_mixed_operation_sequence() {
        let orchestrator = AudioOrchestrator::default();
        let steps: Vec<Box<dyn Fn(&AudioOrchestrator)>> = vec![
            Box::new(|o| {
                o.request_play(lesson(1));
            }),
            Box::new(|o| o.set_duration(60.0)),
            Box::new(|o| {
                o.seek(75.0);
            }),
            Box::new(|o| {
                o.request_play(lesson(2));
            }),
            Box::new(|o| {
                o.minimize();
            }),
            Box::new(|o| {
                o.cancel_audio_change();
            }),
            Box::new(|o| {
                o.request_play(lesson(3));
            }),
            Box::new(|o| {
                o.confirm_audio_change();
            }),
            Box::new(|o| o.set_current_time(12.0)),
            Box::new(|o| o.close()),
            Box::new(|o| {
                o.expand();
            }),
            Box::new(|o| {
                o.request_play(lesson(4));
            }),
        ];

        for step in steps {
            step(&orchestrator);
            assert_invariants(&orchestrator.snapshot());
        }
    }

    #[test]
    fn revision_advances_only_on_change() {
        let orchestrator = AudioOrchestrator::default();
        let start = orchestrator.revision();

        orchestrator.pause();
        orchestrator.cancel_audio_change();
        assert_eq!(orchestrator.revision(), start);

        orchestrator.request_play(lesson(1));
        assert_eq!(orchestrator.revision(), start + 1);
    }
}

mod types {
    use super::*;

    #[test]
    fn speed_parses_with_or_without_suffix() {
        assert_eq!("1.25".parse::<PlaybackSpeed>().unwrap(), PlaybackSpeed::Quick);
        assert_eq!("2x".parse::<PlaybackSpeed>().unwrap(), PlaybackSpeed::Double);
        assert_eq!(" 0.75X ".parse::<PlaybackSpeed>().unwrap(), PlaybackSpeed::Slow);
    }

    #[test]
    fn speed_rejects_rates_outside_the_set() {
        assert!("1.1".parse::<PlaybackSpeed>().is_err());
        assert!("fast".parse::<PlaybackSpeed>().is_err());
        assert!(PlaybackSpeed::try_from(3.0).is_err());
    }

    #[test]
    fn speed_serializes_as_rate() {
        let json = serde_json::to_string(&PlaybackSpeed::Fast).unwrap();
        assert_eq!(json, "1.5");

        let parsed: PlaybackSpeed = serde_json::from_str("0.75").unwrap();
        assert_eq!(parsed, PlaybackSpeed::Slow);
        assert!(serde_json::from_str::<PlaybackSpeed>("0.9").is_err());
    }

    #[test]
    fn mode_parses_names() {
        assert_eq!("Compact".parse::<PlayerMode>().unwrap(), PlayerMode::Compact);
        assert_eq!("mini".parse::<PlayerMode>().unwrap(), PlayerMode::Minimized);
        assert!("sidebar".parse::<PlayerMode>().is_err());
    }

    #[test]
    fn display_title_falls_back_to_url() {
        let track = Track::new("https://cdn.example/a.mp3");
        assert_eq!(track.display_title(), "https://cdn.example/a.mp3");
    }
}
