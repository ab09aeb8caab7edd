use super::*;
use crate::clock::PlayState;
use crate::scene::state::Tone;

const FIXTURE: &str = r#"{
    "name": "fixture",
    "viewport": { "width": 100, "height": 30, "control_height": 6, "min_width": 60, "min_height": 16 },
    "fields": [{ "name": "speed", "min": 0.25, "max": 2.0, "default": 1.0 }],
    "flags": [{ "name": "loop", "default": false }],
    "clock": { "cycle": 4, "loop_flag": "loop", "speed_field": "speed", "max_step": 10 },
    "selections": 4,
    "auto_advance": { "interval": 2 },
    "keys": [
        { "key": "Space", "command": { "type": "toggle_play" } },
        { "key": "l", "command": { "type": "toggle", "flag": "loop" } }
    ],
    "regions": [
        { "id": "play", "anchor": "control", "x": 2, "y": 1, "w": 10, "h": 2,
          "behavior": { "kind": "button", "command": { "type": "toggle_play" } } },
        { "id": "scrub", "anchor": "control", "x": 10, "y": 4, "w": 40, "h": 1,
          "behavior": { "kind": "slider", "field": "time" } }
    ]
}"#;

fn engine() -> Engine {
    let config = SketchConfig::from_json(FIXTURE).expect("fixture parses");
    Engine::from_config(config).expect("fixture validates")
}

fn time(engine: &Engine) -> f64 {
    engine.state().value("time").unwrap_or(f64::NAN)
}

#[test]
fn init_rejects_invalid_configs() {
    let config = SketchConfig::from_json(
        r#"{ "name": "bad", "regions": [{ "id": "a", "x": 0, "y": 0, "w": 1, "behavior": { "kind": "button" } }] }"#,
    )
    .expect("parses");
    assert!(matches!(Engine::from_config(config), Err(ConfigError::MissingBounds { .. })));
}

#[test]
fn loop_flag_seeds_the_clock() {
    let engine = engine();
    let clock = engine.state().clock.as_ref().expect("clock configured");
    assert!(!clock.looping);
}

#[test]
fn clicking_play_twice_returns_to_stopped() {
    let mut engine = engine();
    // Play button: control area starts at y = 24.
    assert_eq!(engine.on_pointer_down(5.0, 26.0), Some(Command::TogglePlay));
    engine.on_pointer_up(5.0, 26.0);
    assert!(engine.state().clock.as_ref().is_some_and(|c| c.is_playing()));
    engine.on_pointer_down(5.0, 26.0);
    assert_eq!(engine.state().clock.as_ref().map(|c| c.state), Some(PlayState::Stopped));
}

#[test]
fn scrubbing_seeks_the_clock() {
    let mut engine = engine();
    engine.on_pointer_down(30.0, 28.0);
    assert!((time(&engine) - 2.0).abs() < 1e-9);
    engine.on_pointer_move(50.0, 3.0);
    assert!((time(&engine) - 4.0).abs() < 1e-9);
}

#[test]
fn non_looping_clock_finishes_at_the_cycle() {
    let mut engine = engine();
    engine.apply(&Command::TogglePlay);
    engine.tick(5.0);
    assert_eq!(time(&engine), 4.0);
    assert!(!engine.state().clock.as_ref().is_some_and(|c| c.is_playing()));
}

#[test]
fn loop_toggle_switches_the_clock_to_wrapping() {
    let mut engine = engine();
    assert_eq!(engine.on_key(Key::Char('l')), Some(Command::Toggle { flag: "loop".into() }));
    engine.apply(&Command::TogglePlay);
    engine.tick(5.0);
    assert!((time(&engine) - 1.0).abs() < 1e-9);
    assert!(engine.state().clock.as_ref().is_some_and(|c| c.is_playing()));
}

#[test]
fn speed_field_scales_the_clock() {
    let mut engine = engine();
    engine.apply(&Command::SetSlider { field: "speed".into(), value: 0.5 });
    engine.apply(&Command::TogglePlay);
    engine.tick(2.0);
    assert!((time(&engine) - 1.0).abs() < 1e-9);
}

#[test]
fn steps_pause_and_move_by_the_step() {
    let mut engine = engine();
    engine.apply(&Command::TogglePlay);
    engine.apply(&Command::StepForward);
    engine.apply(&Command::StepForward);
    assert!((time(&engine) - 0.2).abs() < 1e-9);
    assert!(!engine.state().clock.as_ref().is_some_and(|c| c.is_playing()));
    engine.apply(&Command::StepBack);
    assert!((time(&engine) - 0.1).abs() < 1e-9);
}

#[test]
fn slider_rejects_non_finite_values() {
    let mut engine = engine();
    engine.apply(&Command::SetSlider { field: "speed".into(), value: f64::NAN });
    assert_eq!(engine.state().value("speed"), Some(1.0));
}

#[test]
fn reset_cancels_auto_advance_and_clears_input() {
    let mut engine = engine();
    engine.apply(&Command::AutoAdvance);
    engine.tick(2.0);
    assert_eq!(engine.state().selected(), 1);
    engine.apply(&Command::Type { ch: '3' });
    engine.state.set_message("hello", Tone::Info);

    engine.apply(&Command::Reset);
    assert_eq!(engine.state().selected(), 0);
    assert!(engine.state().input.is_empty());
    assert!(engine.state().message.is_none());
    assert!(!engine.state().auto.as_ref().is_some_and(|a| a.is_active()));
    engine.tick(4.0);
    assert_eq!(engine.state().selected(), 0);
}

#[test]
fn resize_below_minimum_clamps_and_relayouts() {
    let mut engine = engine();
    engine.on_resize(10.0, 5.0);
    assert_eq!((engine.viewport().width, engine.viewport().height), (60.0, 16.0));
    let canvas = engine.viewport().canvas();
    assert!(engine.regions().iter().all(|r| r.bounds.within(&canvas)));
    assert_eq!(engine.regions()[1].bounds.y, 14.0);
}

#[test]
fn resize_drops_stale_hover() {
    let mut engine = engine();
    engine.on_pointer_move(5.0, 26.0);
    assert!(engine.interaction().is_hovered("play"));
    engine.on_resize(120.0, 40.0);
    assert_eq!(engine.interaction().hovered, None);
}

#[test]
fn unbound_keys_do_nothing() {
    let mut engine = engine();
    assert_eq!(engine.on_key(Key::Char('z')), None);
}

#[test]
fn applied_commands_are_logged_in_order() {
    let mut engine = engine();
    engine.on_key(Key::Char(' '));
    engine.on_key(Key::Char('z'));
    engine.on_key(Key::Char('l'));
    assert_eq!(
        engine.commands(),
        &[Command::TogglePlay, Command::Toggle { flag: "loop".into() }]
    );
}

#[test]
fn command_log_keeps_only_the_latest_entries() {
    let mut engine = engine();
    for index in 0..HISTORY_LIMIT + 3 {
        engine.apply(&Command::Select { index: index % 4 });
    }
    assert_eq!(engine.commands().len(), HISTORY_LIMIT);
    assert_eq!(engine.commands()[0], Command::Select { index: 3 });
}
