//! Renderer: the stateless draw pass.
//!
//! Takes the sketch state, interaction state and resolved regions and produces
//! a `Frame` of drawing commands. It never mutates the model and keeps no
//! state between calls: rendering twice with the same inputs yields the same
//! frame. It knows nothing about terminals or pixels on screen.

use crate::input::Command;
use crate::layout::Viewport;
use crate::scene::region::{Behavior, Region, Shape};
use crate::scene::state::{InteractionState, SketchState};
use crate::sketch::Sketch;
use crate::types::{Align, Color, DrawCmd, Frame, NamedColor, Point, Rect, Style};

pub const Z_BACKGROUND: i32 = 0;
/// Base layer for sketch scene content.
pub const Z_SCENE: i32 = 10;
/// Base layer for regions; each region gets `REGION_LAYERS` layers above it.
pub const Z_REGIONS: i32 = 100;
const REGION_LAYERS: i32 = 4;
/// Callouts and tooltips drawn over everything.
pub const Z_OVERLAY: i32 = 10_000;

pub const DRAW_BG: Color = Color::rgb(248, 249, 250);
pub const CONTROL_BG: Color = Color::rgb(230, 232, 235);
pub const TEXT: Color = Color::rgb(50, 50, 50);
pub const MUTED: Color = Color::rgb(120, 120, 120);
pub const ACCENT: Color = Color::rgb(100, 180, 255);
pub const SUCCESS: Color = Color::rgb(76, 175, 80);
pub const ERROR: Color = Color::rgb(244, 67, 54);
const BUTTON_BG: Color = Color::rgb(60, 60, 70);
const BUTTON_HOVER_BG: Color = Color::rgb(90, 90, 105);
const ACTIVE_BG: Color = Color::rgb(33, 150, 243);
const TRACK_BG: Color = Color::rgb(200, 200, 200);
const OFF_BG: Color = Color::rgb(158, 158, 158);

/// Everything a draw pass reads. Borrowed, never owned.
pub struct RenderContext<'a> {
    pub viewport: Viewport,
    pub title: &'a str,
    pub regions: &'a [Region],
    pub state: &'a SketchState,
    pub interaction: &'a InteractionState,
}

impl RenderContext<'_> {
    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    /// Hint of the hovered region, if it has one.
    pub fn hovered_hint(&self) -> Option<(&Region, &str)> {
        let id = self.interaction.hovered.as_deref()?;
        let region = self.region(id)?;
        region.hint.as_deref().map(|hint| (region, hint))
    }
}

/// How strongly a region is drawn. A pure function of interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Normal,
    Hovered,
    Dragged,
    Disabled,
}

pub fn emphasis(region: &Region, interaction: &InteractionState) -> Emphasis {
    if !region.enabled {
        Emphasis::Disabled
    } else if interaction.is_dragged(&region.id) {
        Emphasis::Dragged
    } else if interaction.is_hovered(&region.id) {
        Emphasis::Hovered
    } else {
        Emphasis::Normal
    }
}

pub struct Renderer;

impl Renderer {
    /// Paint one full frame.
    pub fn render(ctx: &RenderContext<'_>, sketch: &dyn Sketch) -> Frame {
        let mut cmds = Vec::new();
        let vp = &ctx.viewport;

        cmds.push(DrawCmd::fill(vp.draw_area(), Style::bg(DRAW_BG), Z_BACKGROUND));
        cmds.push(DrawCmd::fill(vp.control_area(), Style::bg(CONTROL_BG), Z_BACKGROUND));
        if !ctx.title.is_empty() {
            cmds.push(DrawCmd::text(
                Point::new(vp.width / 2.0, 1.0),
                ctx.title,
                Align::Center,
                Style::fg(TEXT).bold(),
                Z_SCENE,
            ));
        }

        sketch.draw(ctx, &mut cmds);

        for (i, region) in ctx.regions.iter().enumerate() {
            let z = Z_REGIONS + i as i32 * REGION_LAYERS;
            Self::draw_region(ctx, region, z, &mut cmds);
        }

        Frame {
            width: vp.width.ceil() as u16,
            height: vp.height.ceil() as u16,
            cmds,
        }
    }

    fn draw_region(ctx: &RenderContext<'_>, region: &Region, z: i32, cmds: &mut Vec<DrawCmd>) {
        let em = emphasis(region, ctx.interaction);
        let before = cmds.len();
        match &region.behavior {
            Behavior::Button { command, .. } => {
                Self::draw_button(ctx, region, command.as_ref(), em, z, cmds);
            }
            Behavior::Slider { field, decimals } => {
                Self::draw_slider(ctx, region, field, *decimals, em, z, cmds);
            }
            Behavior::Toggle { flag, on_label, off_label } => {
                let on = ctx.state.flag(flag);
                let label = match (on, on_label, off_label) {
                    (true, Some(l), _) | (false, _, Some(l)) => l.clone(),
                    _ => format!("{}: {}", region.label, if on { "ON" } else { "OFF" }),
                };
                let bg = if on { ACTIVE_BG } else { OFF_BG };
                Self::draw_box(region, &label, bg, em, z, cmds);
            }
            Behavior::DropZone => {
                let border = if em == Emphasis::Hovered { ACCENT } else { MUTED };
                cmds.push(DrawCmd::stroke(region.bounds, Style::fg(border), z));
                cmds.push(DrawCmd::text(
                    Point::new(region.bounds.x + 2.0, region.bounds.y),
                    region.label.clone(),
                    Align::Left,
                    Style::fg(TEXT),
                    z + 1,
                ));
                let placed = ctx.state.placements.iter().filter(|(_, zone)| *zone == region.id);
                for (row, (item, _)) in placed.enumerate() {
                    let y = region.bounds.y + 1.0 + row as f64;
                    if y >= region.bounds.bottom() - 1.0 {
                        break;
                    }
                    let label = ctx.region(item).map_or(item.as_str(), |r| r.label.as_str());
                    cmds.push(DrawCmd::text(
                        Point::new(region.bounds.x + 2.0, y),
                        label,
                        Align::Left,
                        Style::fg(TEXT),
                        z + 1,
                    ));
                }
            }
        }
        // Previous/next dim at the ends of the selection, as disabled regions do.
        let exhausted = match &region.behavior {
            Behavior::Button { command: Some(Command::SelectPrev), .. } => ctx.state.selected() == 0,
            Behavior::Button { command: Some(Command::SelectNext), .. } => ctx.state.is_last_selected(),
            _ => false,
        };
        if em == Emphasis::Disabled || exhausted {
            for cmd in &mut cmds[before..] {
                cmd.style = cmd.style.dim();
            }
        }
    }

    fn draw_button(
        ctx: &RenderContext<'_>,
        region: &Region,
        command: Option<&Command>,
        em: Emphasis,
        z: i32,
        cmds: &mut Vec<DrawCmd>,
    ) {
        let playing = ctx.state.clock.as_ref().is_some_and(|c| c.is_playing());
        let label = match command {
            Some(Command::TogglePlay) if playing => "❚❚ Pause".to_string(),
            Some(Command::TogglePlay) => "▶ Play".to_string(),
            _ => region.label.clone(),
        };
        let active = match command {
            Some(Command::Select { index }) => *index == ctx.state.selected(),
            Some(Command::AutoAdvance) => ctx.state.auto.as_ref().is_some_and(|a| a.is_active()),
            _ => false,
        };

        let bg = region.style.bg.unwrap_or(BUTTON_BG);
        let bg = if active { ACTIVE_BG } else { bg };
        Self::draw_box(region, &label, bg, em, z, cmds);
    }

    /// Filled body with a centered label; circles for circular regions.
    fn draw_box(region: &Region, label: &str, bg: Color, em: Emphasis, z: i32, cmds: &mut Vec<DrawCmd>) {
        let bg = match em {
            Emphasis::Hovered if bg == BUTTON_BG => BUTTON_HOVER_BG,
            _ => bg,
        };
        let fg = region.style.fg.unwrap_or(Color::named(NamedColor::White));
        let b = region.bounds;
        match region.shape {
            Shape::Rect => {
                cmds.push(DrawCmd::fill(b, Style::bg(bg), z));
                if matches!(em, Emphasis::Hovered | Emphasis::Dragged) {
                    cmds.push(DrawCmd::stroke(b, Style::fg(ACCENT), z + 1));
                }
            }
            Shape::Circle => {
                let radius = b.w.min(b.h) / 2.0;
                let radius = if em == Emphasis::Hovered { radius + 0.5 } else { radius };
                cmds.push(DrawCmd::circle(b.center(), radius, true, Style::fg(bg), z));
            }
        }
        let mut style = Style::fg(fg).bold();
        style.bg = Some(bg);
        cmds.push(DrawCmd::text(b.center(), label, Align::Center, style, z + 2));
    }

    fn draw_slider(
        ctx: &RenderContext<'_>,
        region: &Region,
        field: &str,
        decimals: usize,
        em: Emphasis,
        z: i32,
        cmds: &mut Vec<DrawCmd>,
    ) {
        let b = region.bounds;
        let (Some(value), Some((min, max))) = (ctx.state.value(field), ctx.state.domain(field)) else {
            return;
        };
        let t = ((value - min) / (max - min)).clamp(0.0, 1.0);
        let accent = region.style.fg.unwrap_or(ACCENT);
        // Track sits on the middle cell row.
        let row = b.y + ((b.h - 1.0) / 2.0).max(0.0).floor();

        cmds.push(DrawCmd::fill(Rect::new(b.x, row, b.w, 1.0), Style::bg(TRACK_BG), z));
        cmds.push(DrawCmd::fill(Rect::new(b.x, row, b.w * t, 1.0), Style::bg(accent), z + 1));

        let handle = Point::new(b.x + b.w * t, row);
        let handle_style = match em {
            Emphasis::Dragged | Emphasis::Hovered => Style::fg(accent).bold(),
            _ => Style::fg(TEXT),
        };
        cmds.push(DrawCmd::text(handle, "●", Align::Center, handle_style, z + 2));

        if !region.label.is_empty() {
            cmds.push(DrawCmd::text(
                Point::new(b.x - 1.0, row),
                region.label.clone(),
                Align::Right,
                Style::fg(TEXT),
                z + 2,
            ));
        }
        let unit = ctx.state.unit(field).map(|u| format!(" {u}")).unwrap_or_default();
        cmds.push(DrawCmd::text(
            Point::new(b.right() + 2.0, row),
            format!("{value:.decimals$}{unit}"),
            Align::Left,
            Style::fg(TEXT),
            z + 2,
        ));
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
