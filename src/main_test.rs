use super::*;

#[test]
fn snapshot_seconds_must_be_finite_and_bounded() {
    assert_eq!(parse_seconds("2.5").ok(), Some(2.5));
    assert_eq!(parse_seconds("0").ok(), Some(0.0));
    for bad in ["inf", "NaN", "-1", "1e9", "soon"] {
        assert!(parse_seconds(bad).is_err(), "{bad} accepted");
    }
}

#[test]
fn simulating_starts_the_clock() {
    let mut engine = load_engine("animation-control-panel").expect("built-in loads");
    simulate(&mut engine, 1.0);
    let time = engine.state().value("time").unwrap_or(f64::NAN);
    assert!((time - 1.0).abs() < 1e-6, "time = {time}");
}

#[test]
fn zero_seconds_leaves_the_clock_stopped() {
    let mut engine = load_engine("animation-control-panel").expect("built-in loads");
    simulate(&mut engine, 0.0);
    assert!(engine.state().clock.as_ref().is_some_and(|c| !c.is_playing()));
    assert!(engine.commands().is_empty());
}
