// Integration tests for the built-in sketches

use microsim::backend::{Surface, TextSurface};
use microsim::engine::Engine;
use microsim::input::{Command, Key};
use microsim::scene::state::Tone;
use microsim::sketch::{self, BUILTINS};
use microsim::types::{Point, Primitive};

/// Exact in binary, so accumulated time stays exact.
const STEP: f64 = 0.125;

fn load(name: &str) -> Engine {
    let builtin = sketch::find(name).expect("built-in exists");
    let config = builtin.config().expect("built-in config parses");
    Engine::init(config, builtin.sketch()).expect("built-in config validates")
}

fn run(engine: &mut Engine, seconds: f64) {
    let steps = (seconds / STEP).round() as usize;
    for _ in 0..steps {
        engine.tick(STEP);
    }
}

fn center_of(engine: &Engine, id: &str) -> Point {
    engine
        .regions()
        .iter()
        .find(|r| r.id == id)
        .map(|r| r.bounds.center())
        .unwrap_or_else(|| panic!("region {id} exists"))
}

fn click(engine: &mut Engine, id: &str) -> Option<Command> {
    let p = center_of(engine, id);
    let cmd = engine.on_pointer_down(p.x, p.y);
    engine.on_pointer_up(p.x, p.y);
    cmd
}

fn is_dimmed(engine: &Engine, label: &str) -> bool {
    engine
        .frame()
        .cmds
        .iter()
        .find(|c| matches!(&c.prim, Primitive::Text { text, .. } if text == label))
        .map(|c| c.style.dim)
        .unwrap_or_else(|| panic!("{label} drawn"))
}

fn screen(engine: &Engine) -> String {
    let mut surface = TextSurface::new();
    surface.present(&engine.frame()).expect("text surface never fails");
    surface.text()
}

#[test]
fn every_builtin_loads_and_validates() {
    assert_eq!(BUILTINS.len(), 3);
    for builtin in BUILTINS {
        let config = builtin.config().expect("built-in config parses");
        assert_eq!(config.name, builtin.name);
        assert_eq!(config.sketch.as_deref(), Some(builtin.name));
        assert!(Engine::init(config, builtin.sketch()).is_ok(), "{} failed", builtin.name);
    }
}

#[test]
fn builtin_regions_stay_inside_the_canvas_at_any_size() {
    for builtin in BUILTINS {
        let mut engine = load(builtin.name);
        for (w, h) in [(1.0, 1.0), (60.0, 18.0), (100.0, 30.0), (240.0, 70.0)] {
            engine.on_resize(w, h);
            let canvas = engine.viewport().canvas();
            for region in engine.regions() {
                assert!(region.bounds.within(&canvas), "{} / {} at {w}x{h}", builtin.name, region.id);
                assert!(region.bounds.w > 0.0 && region.bounds.h > 0.0);
            }
        }
    }
}

#[test]
fn control_panel_snapshot_shows_title_controls_and_idle_callout() {
    let engine = load("animation-control-panel");
    let text = screen(&engine);
    assert!(text.contains("Animation Control Panel"));
    assert!(text.contains("▶ Play"));
    assert!(text.contains("Hover over controls to see their purpose"));
    assert!(text.contains("0.0s / 4.0s"));
}

#[test]
fn control_panel_hover_shows_the_hint() {
    let mut engine = load("animation-control-panel");
    let p = center_of(&engine, "restart");
    engine.on_pointer_move(p.x, p.y);
    assert!(screen(&engine).contains("Jump back to the beginning and stop"));
}

#[test]
fn control_panel_loops_by_default_and_stops_when_loop_is_off() {
    let mut engine = load("animation-control-panel");
    assert_eq!(engine.on_key(Key::Char(' ')), Some(Command::TogglePlay));
    run(&mut engine, 4.5);
    assert_eq!(engine.state().value("time"), Some(0.5));

    assert_eq!(click(&mut engine, "loop"), Some(Command::Toggle { flag: "loop".into() }));
    run(&mut engine, 4.0);
    assert_eq!(engine.state().value("time"), Some(4.0));
    assert!(!engine.state().clock.as_ref().is_some_and(|c| c.is_playing()));
    assert!(screen(&engine).contains("▶ Play"));
}

#[test]
fn control_panel_speed_slider_doubles_playback() {
    let mut engine = load("animation-control-panel");
    let speed = engine.regions().iter().find(|r| r.id == "speed").map(|r| r.bounds).expect("speed slider");
    engine.on_pointer_down(speed.right(), speed.y);
    engine.on_pointer_up(speed.right(), speed.y);
    assert_eq!(engine.state().value("speed"), Some(2.0));

    engine.on_key(Key::Char(' '));
    run(&mut engine, 1.0);
    assert_eq!(engine.state().value("time"), Some(2.0));
}

#[test]
fn pendulum_checks_a_typed_answer() {
    let mut engine = load("pendulum-period");
    for ch in "2.0".chars() {
        assert_eq!(engine.on_key(Key::Char(ch)), Some(Command::Type { ch }));
    }
    assert_eq!(engine.on_key(Key::Enter), Some(Command::Submit));
    let msg = engine.state().message.clone().expect("feedback shown");
    assert_eq!(msg.tone, Tone::Success);
    assert!(screen(&engine).contains("✓ Correct!"));

    assert_eq!(engine.on_key(Key::Escape), Some(Command::Reset));
    assert!(engine.state().input.is_empty());
    assert!(engine.state().message.is_none());
}

#[test]
fn pendulum_check_button_rejects_an_empty_answer() {
    let mut engine = load("pendulum-period");
    assert_eq!(click(&mut engine, "check"), Some(Command::Submit));
    assert_eq!(
        engine.state().message.as_ref().map(|m| m.text.as_str()),
        Some("Please enter a valid number.")
    );
}

#[test]
fn pendulum_show_steps_reveals_the_working() {
    let mut engine = load("pendulum-period");
    assert!(!screen(&engine).contains("T = 2π × "));
    click(&mut engine, "show-steps");
    let text = screen(&engine);
    assert!(text.contains("T = 2π × "));
    assert!(text.contains("Hide Steps"));
}

#[test]
fn discovery_nodes_select_their_step() {
    let mut engine = load("guided-discovery");
    assert_eq!(click(&mut engine, "step-3"), Some(Command::Select { index: 2 }));
    assert_eq!(engine.state().selected(), 2);
    assert!(screen(&engine).contains("Step 3 of 9: Explore Freely"));
}

#[test]
fn discovery_auto_play_advances_every_two_seconds_until_the_end() {
    let mut engine = load("guided-discovery");
    assert_eq!(click(&mut engine, "auto-play"), Some(Command::AutoAdvance));
    run(&mut engine, 2.0);
    assert_eq!(engine.state().selected(), 1);
    run(&mut engine, 30.0);
    assert_eq!(engine.state().selected(), 8);
    assert!(!engine.state().auto.as_ref().is_some_and(|a| a.is_active()));
}

#[test]
fn discovery_second_auto_play_replaces_the_first() {
    let mut engine = load("guided-discovery");
    click(&mut engine, "auto-play");
    run(&mut engine, 1.0);
    click(&mut engine, "auto-play");
    run(&mut engine, 1.5);
    // The first run would have fired at 2.0s.
    assert_eq!(engine.state().selected(), 0);
    run(&mut engine, 0.5);
    assert_eq!(engine.state().selected(), 1);
}

#[test]
fn discovery_reset_returns_to_the_first_step() {
    let mut engine = load("guided-discovery");
    click(&mut engine, "auto-play");
    run(&mut engine, 4.0);
    assert_eq!(click(&mut engine, "reset"), Some(Command::Reset));
    assert_eq!(engine.state().selected(), 0);
    run(&mut engine, 4.0);
    assert_eq!(engine.state().selected(), 0);
}

#[test]
fn discovery_panel_shows_the_example_and_detail_of_the_step() {
    let mut engine = load("guided-discovery");
    click(&mut engine, "step-2");
    let text = screen(&engine);
    assert!(text.contains("Example: \"Focus on length only - mass and amplitude are locked\""));
    assert!(text.contains("Limit variables to prevent confusion and focus discovery."));
}

#[test]
fn discovery_node_hover_shows_its_example() {
    let mut engine = load("guided-discovery");
    let p = center_of(&engine, "step-9");
    engine.on_pointer_move(p.x, p.y);
    assert!(screen(&engine).contains("Apply this to predict: a 4m pendulum vs 1m..."));
}

#[test]
fn discovery_comparison_warns_about_skipping_the_step() {
    let mut engine = load("guided-discovery");
    let text = screen(&engine);
    assert!(text.contains("Show Pure Discovery"));
    assert!(!text.contains("Without This Step"));

    assert_eq!(click(&mut engine, "compare"), Some(Command::Toggle { flag: "show_comparison".into() }));
    let text = screen(&engine);
    assert!(text.contains("Hide Comparison"));
    assert!(text.contains("Without This Step"));
    assert!(text.contains("Students may never discover the concept"));

    click(&mut engine, "step-3");
    assert!(screen(&engine).contains("Wasted cognitive resources"));
    click(&mut engine, "step-5");
    assert!(screen(&engine).contains("Students may never discover the concept"));

    engine.on_key(Key::Char('c'));
    assert!(!screen(&engine).contains("Without This Step"));
}

#[test]
fn discovery_previous_and_next_dim_at_the_ends() {
    let mut engine = load("guided-discovery");
    assert!(is_dimmed(&engine, "◀ Previous"));
    assert!(!is_dimmed(&engine, "Next ▶"));

    click(&mut engine, "next");
    assert!(!is_dimmed(&engine, "◀ Previous"));

    click(&mut engine, "step-9");
    assert!(is_dimmed(&engine, "Next ▶"));
    assert!(!is_dimmed(&engine, "◀ Previous"));
}
