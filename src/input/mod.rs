//! Input dispatcher: maps pointer and key events to logical commands.
//!
//! The dispatcher only touches `InteractionState` (hover, drag, pointer).
//! Everything else is expressed as a `Command` that the engine applies to the
//! sketch state, so hit-testing can be exercised without a backend.

mod command;
mod key;

pub use command::Command;
pub use key::Key;

use crate::scene::region::{Behavior, Region};
use crate::scene::state::{InteractionState, SketchState};
use crate::scene::KeyBinding;
use crate::types::{Point, Rect};

/// Topmost enabled region containing `p`. Regions declared later are drawn
/// later, so they win ties.
pub fn hit_test(regions: &[Region], p: Point) -> Option<&Region> {
    regions.iter().rev().find(|r| r.enabled && r.contains(p))
}

/// Map a pointer x coordinate on a horizontal track to `[min, max]`, clamped
/// at both ends.
pub fn slider_value(track: &Rect, x: f64, min: f64, max: f64) -> f64 {
    if track.w <= 0.0 || !x.is_finite() {
        return min;
    }
    let t = ((x - track.x) / track.w).clamp(0.0, 1.0);
    min + (max - min) * t
}

fn slider_command(region: &Region, state: &SketchState, p: Point) -> Option<Command> {
    let Behavior::Slider { field, .. } = &region.behavior else {
        return None;
    };
    let (min, max) = state.domain(field)?;
    Some(Command::SetSlider {
        field: field.clone(),
        value: slider_value(&region.bounds, p.x, min, max),
    })
}

pub fn pointer_down(
    interaction: &mut InteractionState,
    regions: &[Region],
    state: &SketchState,
    p: Point,
) -> Option<Command> {
    interaction.pointer = Some(p);
    // A press without a matching release (focus lost mid-drag) must not leave
    // two drags alive.
    interaction.end_drag();

    let Some(region) = hit_test(regions, p) else {
        interaction.hovered = None;
        return None;
    };
    interaction.hovered = Some(region.id.clone());

    if region.behavior.is_draggable() {
        interaction.begin_drag(&region.id);
    }

    match &region.behavior {
        Behavior::Button { draggable: true, .. } => None,
        Behavior::Button { command, .. } => command.clone(),
        Behavior::Slider { .. } => slider_command(region, state, p),
        Behavior::Toggle { flag, .. } => Some(Command::Toggle { flag: flag.clone() }),
        Behavior::DropZone => None,
    }
}

pub fn pointer_move(
    interaction: &mut InteractionState,
    regions: &[Region],
    state: &SketchState,
    p: Point,
) -> Option<Command> {
    interaction.pointer = Some(p);

    if let Some(id) = interaction.dragged.clone() {
        // The dragged region keeps following the pointer even outside its
        // bounds; the value clamps at the track ends.
        return match regions.iter().find(|r| r.id == id) {
            Some(region) => slider_command(region, state, p),
            None => {
                interaction.end_drag();
                None
            }
        };
    }

    interaction.hovered = hit_test(regions, p).map(|r| r.id.clone());
    None
}

pub fn pointer_up(
    interaction: &mut InteractionState,
    regions: &[Region],
    p: Point,
) -> Option<Command> {
    interaction.pointer = Some(p);
    let dragged = interaction.end_drag()?;

    let is_draggable_button = regions
        .iter()
        .any(|r| r.id == dragged && matches!(r.behavior, Behavior::Button { draggable: true, .. }));
    if !is_draggable_button {
        return None;
    }

    let zone = regions
        .iter()
        .rev()
        .find(|r| r.enabled && matches!(r.behavior, Behavior::DropZone) && r.contains(p))?;
    Some(Command::Drop { zone: zone.id.clone(), item: dragged })
}

/// Map a key to a command. With text input enabled, digits, `.`, Backspace
/// and Enter feed the typed answer before the key map is consulted.
pub fn key_press(bindings: &[KeyBinding], text_input: bool, key: Key) -> Option<Command> {
    if text_input {
        match key {
            Key::Char(ch) if ch.is_ascii_digit() || ch == '.' => return Some(Command::Type { ch }),
            Key::Backspace => return Some(Command::Erase),
            Key::Enter => return Some(Command::Submit),
            _ => {}
        }
    }
    bindings
        .iter()
        .find(|b| b.key == key)
        .map(|b| b.command.clone())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
