use super::*;
use crate::layout::{self, Viewport};
use crate::scene::SketchConfig;

const FIXTURE: &str = r#"{
    "name": "fixture",
    "viewport": { "width": 200, "height": 100, "control_height": 20, "min_width": 200, "min_height": 100 },
    "fields": [{ "name": "length", "min": 0.2, "max": 2.0, "default": 1.0 }],
    "flags": [{ "name": "loop" }],
    "selections": 3,
    "regions": [
        { "id": "back", "x": 0, "y": 0, "w": 50, "h": 50,
          "behavior": { "kind": "button", "command": { "type": "restart" } } },
        { "id": "front", "x": 25, "y": 25, "w": 50, "h": 50,
          "behavior": { "kind": "button", "command": { "type": "toggle_play" } } },
        { "id": "off", "x": 100, "y": 0, "w": 20, "h": 20, "enabled": false,
          "behavior": { "kind": "button", "command": { "type": "reset" } } },
        { "id": "node", "x": 130, "y": 0, "w": 20, "h": 20, "shape": "circle",
          "behavior": { "kind": "button", "command": { "type": "select", "index": 1 } } },
        { "id": "length", "anchor": "control", "x": 30, "y": 5, "w": 100, "h": 10,
          "behavior": { "kind": "slider", "field": "length" } },
        { "id": "loop", "anchor": "control", "x": 150, "y": 5, "w": 40, "h": 10,
          "behavior": { "kind": "toggle", "flag": "loop" } },
        { "id": "card", "x": 0, "y": 60, "w": 20, "h": 10,
          "behavior": { "kind": "button", "draggable": true } },
        { "id": "bin", "x": 150, "y": 40, "w": 40, "h": 30,
          "behavior": { "kind": "drop_zone" } }
    ]
}"#;

struct Fixture {
    regions: Vec<Region>,
    state: SketchState,
    interaction: InteractionState,
}

fn fixture() -> Fixture {
    let cfg = SketchConfig::from_json(FIXTURE).expect("fixture parses");
    cfg.validate().expect("fixture validates");
    let vp = Viewport::new(200.0, 100.0, 20.0);
    Fixture {
        regions: layout::layout(&vp, &cfg.regions),
        state: SketchState::from_config(&cfg),
        interaction: InteractionState::default(),
    }
}

impl Fixture {
    fn down(&mut self, x: f64, y: f64) -> Option<Command> {
        pointer_down(&mut self.interaction, &self.regions, &self.state, Point::new(x, y))
    }

    fn drag(&mut self, x: f64, y: f64) -> Option<Command> {
        pointer_move(&mut self.interaction, &self.regions, &self.state, Point::new(x, y))
    }

    fn up(&mut self, x: f64, y: f64) -> Option<Command> {
        pointer_up(&mut self.interaction, &self.regions, Point::new(x, y))
    }
}

fn slid(cmd: Option<Command>) -> f64 {
    match cmd {
        Some(Command::SetSlider { value, .. }) => value,
        other => panic!("expected a slider command, got {other:?}"),
    }
}

#[test]
fn overlapping_regions_resolve_to_the_last_declared() {
    let f = fixture();
    let hit = hit_test(&f.regions, Point::new(40.0, 40.0)).map(|r| r.id.as_str());
    assert_eq!(hit, Some("front"));
    let hit = hit_test(&f.regions, Point::new(10.0, 10.0)).map(|r| r.id.as_str());
    assert_eq!(hit, Some("back"));
}

#[test]
fn hit_testing_is_deterministic() {
    let f = fixture();
    let p = Point::new(40.0, 40.0);
    let first = hit_test(&f.regions, p).map(|r| r.id.clone());
    for _ in 0..10 {
        assert_eq!(hit_test(&f.regions, p).map(|r| r.id.clone()), first);
    }
}

#[test]
fn region_edges_are_inclusive() {
    let f = fixture();
    assert_eq!(hit_test(&f.regions, Point::new(0.0, 0.0)).map(|r| r.id.as_str()), Some("back"));
    assert_eq!(hit_test(&f.regions, Point::new(75.0, 75.0)).map(|r| r.id.as_str()), Some("front"));
}

#[test]
fn disabled_regions_are_never_hit() {
    let f = fixture();
    assert!(hit_test(&f.regions, Point::new(110.0, 10.0)).is_none());
}

#[test]
fn circle_regions_hit_only_inside_the_circle() {
    let f = fixture();
    assert_eq!(hit_test(&f.regions, Point::new(140.0, 10.0)).map(|r| r.id.as_str()), Some("node"));
    // Bounding-box corner, outside the inscribed circle.
    assert!(hit_test(&f.regions, Point::new(131.0, 1.0)).is_none());
}

#[test]
fn slider_maps_pixels_to_its_domain() {
    // Track spans x = 30..130 for the domain [0.2, 2.0].
    let mut f = fixture();
    assert!((slid(f.down(30.0, 90.0)) - 0.2).abs() < 1e-9);
    f.up(30.0, 90.0);
    assert!((slid(f.down(130.0, 90.0)) - 2.0).abs() < 1e-9);
    f.up(130.0, 90.0);
    assert!((slid(f.down(80.0, 90.0)) - 1.1).abs() < 1e-9);
}

#[test]
fn slider_value_clamps_and_handles_degenerate_tracks() {
    let track = Rect::new(30.0, 0.0, 100.0, 1.0);
    assert_eq!(slider_value(&track, -500.0, 0.2, 2.0), 0.2);
    assert_eq!(slider_value(&track, 500.0, 0.2, 2.0), 2.0);
    assert_eq!(slider_value(&track, f64::NAN, 0.2, 2.0), 0.2);
    assert_eq!(slider_value(&Rect::new(30.0, 0.0, 0.0, 1.0), 40.0, 0.2, 2.0), 0.2);
}

#[test]
fn dragging_a_slider_follows_the_pointer_outside_its_bounds() {
    let mut f = fixture();
    f.down(80.0, 90.0);
    assert!(f.interaction.is_dragged("length"));
    assert!((slid(f.drag(200.0, 10.0)) - 2.0).abs() < 1e-9);
    assert!((slid(f.drag(-20.0, 10.0)) - 0.2).abs() < 1e-9);
    assert_eq!(f.up(-20.0, 10.0), None);
    assert_eq!(f.interaction.dragged, None);
}

#[test]
fn buttons_and_toggles_emit_their_commands() {
    let mut f = fixture();
    assert_eq!(f.down(40.0, 40.0), Some(Command::TogglePlay));
    assert_eq!(f.down(170.0, 90.0), Some(Command::Toggle { flag: "loop".into() }));
    assert_eq!(f.down(140.0, 10.0), Some(Command::Select { index: 1 }));
}

#[test]
fn pressing_outside_every_region_clears_hover_and_drag() {
    let mut f = fixture();
    f.down(80.0, 90.0);
    assert_eq!(f.down(190.0, 5.0), None);
    assert_eq!(f.interaction.hovered, None);
    assert_eq!(f.interaction.dragged, None);
}

#[test]
fn moving_updates_hover_without_commands() {
    let mut f = fixture();
    assert_eq!(f.drag(40.0, 40.0), None);
    assert!(f.interaction.is_hovered("front"));
    f.drag(190.0, 5.0);
    assert_eq!(f.interaction.hovered, None);
}

#[test]
fn at_most_one_drag_is_active() {
    let mut f = fixture();
    f.down(80.0, 90.0);
    f.down(10.0, 65.0);
    assert!(f.interaction.is_dragged("card"));
    assert!(!f.interaction.is_dragged("length"));
}

#[test]
fn releasing_a_draggable_over_a_drop_zone_emits_drop() {
    let mut f = fixture();
    assert_eq!(f.down(10.0, 65.0), None);
    f.drag(160.0, 50.0);
    assert_eq!(
        f.up(160.0, 50.0),
        Some(Command::Drop { zone: "bin".into(), item: "card".into() })
    );
}

#[test]
fn releasing_a_draggable_elsewhere_emits_nothing() {
    let mut f = fixture();
    f.down(10.0, 65.0);
    assert_eq!(f.up(100.0, 60.0), None);
}

#[test]
fn text_input_captures_digits_before_the_key_map() {
    let bindings = vec![KeyBinding { key: Key::Char('1'), command: Command::Reset }];
    assert_eq!(key_press(&bindings, true, Key::Char('1')), Some(Command::Type { ch: '1' }));
    assert_eq!(key_press(&bindings, true, Key::Backspace), Some(Command::Erase));
    assert_eq!(key_press(&bindings, true, Key::Enter), Some(Command::Submit));
    assert_eq!(key_press(&bindings, false, Key::Char('1')), Some(Command::Reset));
    assert_eq!(key_press(&bindings, false, Key::Char('2')), None);
}

#[test]
fn key_names_round_trip_through_display() {
    for name in ["Space", "Enter", "Esc", "Left", "r", "."] {
        let key = Key::parse(name).expect("known key");
        assert_eq!(key.to_string(), name);
    }
    assert_eq!(Key::parse("ab"), None);
}

#[test]
fn command_names_are_stable() {
    assert_eq!(Command::TogglePlay.name(), "toggle-play");
    assert_eq!(Command::Action { name: "shuffle".into() }.name(), "shuffle");
}
