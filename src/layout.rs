//! Layout engine: resolves region specs against the viewport.
//!
//! `layout` is a pure function of `(Viewport, specs)`: same inputs, same boxes.
//! Hit-testing relies on that, so nothing here reads clocks, state or input.

use crate::scene::region::{Anchor, Length, Region, RegionSpec};
use crate::types::Rect;

/// Canvas size with a control strip along the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub control_height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, control_height: f64) -> Self {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        Viewport {
            width,
            height,
            control_height: control_height.clamp(0.0, height),
        }
    }

    /// Grow a degenerate viewport up to the minimum size.
    pub fn clamped(&self, min: &Viewport) -> Viewport {
        Viewport::new(
            self.width.max(min.width),
            self.height.max(min.height),
            self.control_height,
        )
    }

    pub fn canvas(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// The visualization area above the control strip.
    pub fn draw_area(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height - self.control_height)
    }

    pub fn control_area(&self) -> Rect {
        Rect::new(
            0.0,
            self.height - self.control_height,
            self.width,
            self.control_height,
        )
    }

    pub fn area(&self, anchor: Anchor) -> Rect {
        match anchor {
            Anchor::Canvas => self.canvas(),
            Anchor::Draw => self.draw_area(),
            Anchor::Control => self.control_area(),
        }
    }
}

/// Resolve one spec. Missing bounds resolve to zero; `SketchConfig::validate`
/// rejects them before an engine ever lays them out.
pub fn resolve(viewport: &Viewport, spec: &RegionSpec) -> Region {
    let area = viewport.area(spec.anchor);
    let len = |l: Option<Length>, extent: f64| l.map_or(0.0, |l| l.resolve(extent));
    let x = area.x + len(spec.x, area.w);
    let y = area.y + len(spec.y, area.h);
    let w = len(spec.w, area.w);
    let h = len(spec.h, area.h);

    Region {
        id: spec.id.clone(),
        bounds: Rect::new(x, y, w, h).clamp_to(&viewport.canvas()),
        shape: spec.shape,
        label: spec.label.clone(),
        hint: spec.hint.clone(),
        style: spec.style,
        behavior: spec.behavior.clone(),
        enabled: spec.enabled,
    }
}

/// Resolve every spec, preserving declaration order (which is also z-order).
pub fn layout(viewport: &Viewport, specs: &[RegionSpec]) -> Vec<Region> {
    specs.iter().map(|spec| resolve(viewport, spec)).collect()
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
