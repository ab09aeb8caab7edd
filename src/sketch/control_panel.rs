use crate::renderer::{RenderContext, ACCENT, MUTED, TEXT, Z_OVERLAY, Z_SCENE};
use crate::types::{Align, DrawCmd, Point, Style};

use super::Sketch;

const IDLE_CALLOUT: &str = "Hover over controls to see their purpose";

/// A pendulum driven purely by the clock, with transport controls below it.
pub struct ControlPanel;

/// Swing angle in radians at time `t`.
pub fn swing_angle(t: f64) -> f64 {
    (t * std::f64::consts::PI).sin() * 0.5
}

impl Sketch for ControlPanel {
    fn draw(&self, ctx: &RenderContext<'_>, cmds: &mut Vec<DrawCmd>) {
        let Some(clock) = ctx.state.clock.as_ref() else {
            return;
        };
        let area = ctx.viewport.draw_area();

        let pivot = Point::new(area.x + area.w / 2.0, area.y + 3.0);
        let length = (area.h - 8.0).max(2.0);
        let angle = swing_angle(clock.time);
        // Terminal cells are about twice as tall as they are wide.
        let bob = Point::new(pivot.x + angle.sin() * length * 2.0, pivot.y + angle.cos() * length);

        cmds.push(DrawCmd::line(
            Point::new(pivot.x - 6.0, pivot.y),
            Point::new(pivot.x + 6.0, pivot.y),
            Style::fg(MUTED),
            Z_SCENE,
        ));
        cmds.push(DrawCmd::line(pivot, bob, Style::fg(TEXT), Z_SCENE + 1));
        cmds.push(DrawCmd::circle(bob, 1.0, true, Style::fg(ACCENT), Z_SCENE + 2));

        cmds.push(DrawCmd::text(
            Point::new(area.x + 2.0, area.y + 1.0),
            format!("{:.1}s / {:.1}s", clock.time, clock.cycle),
            Align::Left,
            Style::fg(TEXT),
            Z_SCENE,
        ));

        let (callout, style) = match ctx.hovered_hint() {
            Some((_, hint)) => (hint, Style::fg(TEXT).bold()),
            None => (IDLE_CALLOUT, Style::fg(MUTED)),
        };
        cmds.push(DrawCmd::text(
            Point::new(area.x + area.w / 2.0, area.bottom() - 2.0),
            callout,
            Align::Center,
            style,
            Z_OVERLAY,
        ));
    }
}
