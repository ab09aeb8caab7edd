use crate::renderer::{RenderContext, ERROR, MUTED, SUCCESS, TEXT, Z_SCENE};
use crate::scene::state::Tone;
use crate::types::{Align, DrawCmd, Point, Style};

use super::Sketch;

/// Behavior for configs that name no built-in: region commands only, with the
/// current values listed in the draw area.
pub struct Generic;

impl Sketch for Generic {
    fn draw(&self, ctx: &RenderContext<'_>, cmds: &mut Vec<DrawCmd>) {
        let state = ctx.state;
        let area = ctx.viewport.draw_area();
        let x = area.x + 2.0;
        let mut y = area.y + 3.0;
        let mut push = |text: String, style: Style, cmds: &mut Vec<DrawCmd>| {
            if y < area.bottom() - 1.0 {
                cmds.push(DrawCmd::text(Point::new(x, y), text, Align::Left, style, Z_SCENE));
            }
            y += 1.0;
        };

        for (name, field) in state.fields() {
            let unit = state.unit(name).map(|u| format!(" {u}")).unwrap_or_default();
            push(format!("{name}: {:.2}{unit}", field.value), Style::fg(TEXT), cmds);
        }
        for (name, on) in state.flags() {
            push(format!("{name}: {}", if on { "on" } else { "off" }), Style::fg(TEXT), cmds);
        }
        if let Some(clock) = &state.clock {
            push(format!("t = {:.2}s / {:.2}s", clock.time, clock.cycle), Style::fg(TEXT), cmds);
        }
        if state.selections() > 0 {
            push(
                format!("selected: {} / {}", state.selected() + 1, state.selections()),
                Style::fg(TEXT),
                cmds,
            );
        }
        if !state.input.is_empty() {
            push(format!("input: {}", state.input), Style::fg(TEXT), cmds);
        }
        if let Some(msg) = &state.message {
            let color = match msg.tone {
                Tone::Success => SUCCESS,
                Tone::Error => ERROR,
                Tone::Info => TEXT,
            };
            push(msg.text.clone(), Style::fg(color), cmds);
        }
        if let Some((_, hint)) = ctx.hovered_hint() {
            push(hint.to_string(), Style::fg(MUTED), cmds);
        }
    }
}
