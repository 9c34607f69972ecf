//! Integration Tests for the `matrix` command and the control bus
//!
//! Commands typed into the session must reach the animation through the
//! bus, whether or not an engine is currently attached.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use std::sync::Arc;

use matrixterm::animation::config::{CHARACTER_SETS, COLOR_PRESETS};
use matrixterm::animation::AnimationControl;
use matrixterm::commands::matrix::MATRIX_HELP;
use matrixterm::{AnimationConfig, ControlBus, MatrixEngine, OutputKind, SharedEngine};
use test_utils::{session_with_bus, ControlCall, MockAnimation, RecordingSurface};

#[tokio::test]
async fn test_speed_and_color_show_in_status() {
    let (session, bus) = session_with_bus();

    let output = session.submit("matrix speed 4").await.unwrap();
    assert_eq!(output.kind, OutputKind::Success);
    let output = session.submit("matrix color #ff0000").await.unwrap();
    assert_eq!(output.kind, OutputKind::Success);

    let status = session.submit("matrix status").await.unwrap();
    assert_eq!(status.kind, OutputKind::Info);
    assert!(status.content.contains("Speed: 4"));
    assert!(status.content.contains("Color: #ff0000"));
    assert!(status.content.contains("Paused: No"));

    let state = bus.current_state();
    assert_eq!(state.speed(), 4.0);
    assert_eq!(state.color(), "#ff0000");
}

#[tokio::test]
async fn test_invalid_numbers_report_usage() {
    let (session, bus) = session_with_bus();
    let before = bus.current_state();

    let cases = [
        ("matrix speed abc", "Usage: matrix speed <number> (1-10)"),
        ("matrix speed 0", "Usage: matrix speed <number> (1-10)"),
        ("matrix opacity 5", "Usage: matrix opacity <number> (0.1-1.0)"),
        ("matrix fontsize 100", "Usage: matrix fontsize <number> (8-32)"),
        ("matrix trail", "Usage: matrix trail <number> (0.01-0.2)"),
    ];
    for (input, usage) in cases {
        let output = session.submit(input).await.unwrap();
        assert_eq!(output.kind, OutputKind::Error, "{input}");
        assert_eq!(output.content, usage, "{input}");
    }

    assert_eq!(bus.current_state(), before);
}

#[tokio::test]
async fn test_help_for_missing_or_unknown_subcommand() {
    let (session, _bus) = session_with_bus();
    for input in ["matrix", "matrix help", "matrix frobnicate"] {
        let output = session.submit(input).await.unwrap();
        assert_eq!(output.kind, OutputKind::Info);
        assert_eq!(output.content, MATRIX_HELP);
    }
}

#[tokio::test]
async fn test_subcommands_are_case_insensitive() {
    let (session, bus) = session_with_bus();
    session.submit("MATRIX PAUSE").await;
    assert!(bus.current_state().paused());
    session.submit("Matrix Resume").await;
    assert!(!bus.current_state().paused());
}

#[tokio::test]
async fn test_presets() {
    let (session, bus) = session_with_bus();

    let output = session.submit("matrix preset fire").await.unwrap();
    assert_eq!(output.kind, OutputKind::Success);
    let state = bus.current_state();
    assert_eq!(state.color(), "#ff0000");
    assert_eq!(state.character_set_name(), "symbols");

    session.submit("matrix preset binary").await;
    assert_eq!(bus.current_state().character_set(), "01");

    let output = session.submit("matrix preset lava").await.unwrap();
    assert_eq!(output.kind, OutputKind::Error);
    assert_eq!(output.content, "Available presets: matrix, binary, fire, ocean");
}

#[tokio::test]
async fn test_custom_charset_reports_custom() {
    let (session, bus) = session_with_bus();
    session.submit("matrix charset xyz").await;
    assert_eq!(bus.current_state().character_set(), "xyz");

    let status = session.submit("matrix status").await.unwrap();
    assert!(status.content.contains("Character Set: custom"));
}

#[test]
fn test_bus_caches_without_engine() {
    let bus = ControlBus::new(AnimationConfig::default());
    assert!(!bus.is_bound());

    bus.pause();
    bus.set_speed(50.0);
    bus.set_opacity(0.0);
    bus.set_font_size(20.0);
    bus.set_trail_opacity(0.1);
    bus.set_color("#123456");

    let state = bus.current_state();
    assert!(state.paused());
    assert_eq!(state.speed(), 10.0);
    assert_eq!(state.opacity(), 0.1);
    assert_eq!(state.font_size_px(), 20.0);
    assert_eq!(state.trail_opacity(), 0.1);
    assert_eq!(state.color(), "#123456");
}

#[test]
fn test_register_replays_cache() {
    let bus = ControlBus::default();
    bus.set_speed(5.0);
    bus.set_color("#00ffff");

    let mock = Arc::new(MockAnimation::new());
    bus.register(mock.clone());

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        ControlCall::Apply(config) => {
            assert_eq!(config.speed(), 5.0);
            assert_eq!(config.color(), "#00ffff");
        }
        other => panic!("expected replay, got {other:?}"),
    }
    assert_eq!(mock.current_state().speed(), 5.0);
}

#[test]
fn test_bound_setters_forward_to_engine() {
    let bus = ControlBus::default();
    let mock = Arc::new(MockAnimation::new());
    bus.register(mock.clone());

    bus.set_speed(3.0);
    bus.set_character_set("binary");
    bus.resume();

    let calls = mock.calls();
    assert_eq!(
        &calls[1..],
        &[
            ControlCall::Speed(3.0),
            ControlCall::CharacterSet("binary".to_string()),
            ControlCall::Resume,
        ]
    );
    assert_eq!(bus.current_state(), mock.current_state());
}

#[test]
fn test_unregister_keeps_last_known_state() {
    let bus = ControlBus::default();
    let mock = Arc::new(MockAnimation::new());
    bus.register(mock.clone());
    bus.set_speed(7.0);

    bus.unregister();
    assert!(!bus.is_bound());
    bus.set_opacity(0.5);

    assert_eq!(mock.calls().len(), 2);
    let state = bus.current_state();
    assert_eq!(state.speed(), 7.0);
    assert_eq!(state.opacity(), 0.5);
}

#[test]
fn test_registry_queries_are_static() {
    let bus = ControlBus::default();
    assert_eq!(bus.character_sets(), CHARACTER_SETS);
    assert_eq!(bus.color_presets(), COLOR_PRESETS);
    assert!(bus.character_sets().iter().any(|(name, _)| *name == "binary"));
}

#[tokio::test]
async fn test_commands_reach_a_live_engine() {
    let (session, bus) = session_with_bus();
    let engine = SharedEngine::new(MatrixEngine::with_seed(bus.current_state(), 200.0, 100.0, 7));
    bus.register(Arc::new(engine.clone()));
    assert_eq!(engine.lock().columns(), 14);

    session.submit("matrix fontsize 20").await;
    assert_eq!(engine.lock().columns(), 10);
    assert_eq!(engine.lock().config().font_size_px(), 20.0);

    session.submit("matrix pause").await;
    let mut surface = RecordingSurface::new(200.0, 100.0);
    assert!(!engine.frame(&mut surface));
    assert!(surface.glyphs.is_empty());

    session.submit("matrix resume").await;
    assert!(engine.frame(&mut surface));
    assert_eq!(surface.glyphs.len(), 10);
}
