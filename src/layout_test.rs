use super::*;
use crate::scene::region::{Behavior, Shape};
use crate::types::Style;

fn spec(id: &str, anchor: Anchor, x: Length, y: Length, w: Length, h: Length) -> RegionSpec {
    RegionSpec {
        id: id.into(),
        anchor,
        x: Some(x),
        y: Some(y),
        w: Some(w),
        h: Some(h),
        shape: Shape::Rect,
        label: String::new(),
        hint: None,
        style: Style::default(),
        behavior: Behavior::DropZone,
        enabled: true,
    }
}

#[test]
fn viewport_splits_into_draw_and_control_areas() {
    let vp = Viewport::new(100.0, 30.0, 5.0);
    assert_eq!(vp.draw_area(), Rect::new(0.0, 0.0, 100.0, 25.0));
    assert_eq!(vp.control_area(), Rect::new(0.0, 25.0, 100.0, 5.0));
}

#[test]
fn control_height_never_exceeds_the_canvas() {
    let vp = Viewport::new(10.0, 3.0, 5.0);
    assert_eq!(vp.control_height, 3.0);
    assert_eq!(vp.draw_area().h, 0.0);
}

#[test]
fn degenerate_viewport_grows_to_the_minimum() {
    let min = Viewport::new(40.0, 12.0, 5.0);
    let vp = Viewport::new(0.0, f64::NAN, 5.0).clamped(&min);
    assert_eq!((vp.width, vp.height), (40.0, 12.0));
}

#[test]
fn lengths_resolve_against_the_anchor_area() {
    let vp = Viewport::new(100.0, 30.0, 6.0);
    let region = resolve(
        &vp,
        &spec(
            "s",
            Anchor::Control,
            Length::px(10.0),
            Length::px(1.0),
            Length { frac: 0.5, px: -20.0 },
            Length::px(1.0),
        ),
    );
    assert_eq!(region.bounds, Rect::new(10.0, 25.0, 30.0, 1.0));
}

#[test]
fn resolved_bounds_stay_inside_the_canvas() {
    let vp = Viewport::new(50.0, 20.0, 4.0);
    let region = resolve(
        &vp,
        &spec("big", Anchor::Draw, Length::px(40.0), Length::px(-5.0), Length::px(30.0), Length::px(50.0)),
    );
    assert!(region.bounds.within(&vp.canvas()));
    assert_eq!(region.bounds, Rect::new(40.0, 0.0, 10.0, 20.0));
}

#[test]
fn layout_is_deterministic_and_keeps_declaration_order() {
    let vp = Viewport::new(80.0, 24.0, 5.0);
    let specs = vec![
        spec("a", Anchor::Draw, Length::frac(0.1), Length::px(2.0), Length::px(5.0), Length::px(3.0)),
        spec("b", Anchor::Canvas, Length::px(0.0), Length::frac(0.5), Length::frac(1.0), Length::px(1.0)),
    ];
    let first = layout(&vp, &specs);
    let second = layout(&vp, &specs);
    assert_eq!(first, second);
    let ids: Vec<&str> = first.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
}

#[test]
fn regions_track_the_viewport_on_resize() {
    let specs = vec![spec(
        "bar",
        Anchor::Control,
        Length::px(2.0),
        Length::px(0.0),
        Length { frac: 1.0, px: -4.0 },
        Length::px(1.0),
    )];
    let small = layout(&Viewport::new(40.0, 12.0, 4.0), &specs);
    let large = layout(&Viewport::new(120.0, 40.0, 4.0), &specs);
    assert_eq!(small[0].bounds, Rect::new(2.0, 8.0, 36.0, 1.0));
    assert_eq!(large[0].bounds, Rect::new(2.0, 36.0, 116.0, 1.0));
}

#[test]
fn nan_lengths_collapse_instead_of_panicking() {
    let vp = Viewport::new(50.0, 20.0, 4.0);
    let region = resolve(
        &vp,
        &spec("nan", Anchor::Draw, Length::frac(f64::NAN), Length::px(2.0), Length::px(10.0), Length::px(3.0)),
    );
    assert_eq!(region.bounds, Rect::new(0.0, 2.0, 0.0, 3.0));
}
