//! Shared boundary types for the MicroSim engine.
//!
//! This module defines the geometry primitives used by layout and hit-testing,
//! and the Renderer → Surface contract: a `Frame` containing `DrawCmd`s.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared style primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Named(NamedColor),
    Rgb { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Grey,
}

impl Color {
    pub const fn named(n: NamedColor) -> Self {
        Color::Named(n)
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<Color>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub dim: bool,
}

impl Style {
    pub const fn fg(color: Color) -> Self {
        Style { fg: Some(color), bg: None, bold: false, dim: false }
    }

    pub const fn bg(color: Color) -> Self {
        Style { fg: None, bg: Some(color), bold: false, dim: false }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned box in pixel space. Width and height are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Rect { x, y, w: w.max(0.0), h: h.max(0.0) }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Closed on every edge: a point on the boundary is inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Whether this box lies entirely inside `outer`.
    pub fn within(&self, outer: &Rect) -> bool {
        self.x >= outer.x
            && self.y >= outer.y
            && self.right() <= outer.right()
            && self.bottom() <= outer.bottom()
    }

    /// Clamp this box into `outer`, shrinking it rather than moving it.
    /// NaN edges collapse onto the near edge of `outer`.
    pub fn clamp_to(&self, outer: &Rect) -> Rect {
        let x = clamp_or(self.x, outer.x, outer.right());
        let y = clamp_or(self.y, outer.y, outer.bottom());
        let right = clamp_or(self.right(), x, outer.right());
        let bottom = clamp_or(self.bottom(), y, outer.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    pub fn inset(&self, by: f64) -> Rect {
        Rect::new(self.x + by, self.y + by, self.w - 2.0 * by, self.h - 2.0 * by)
    }
}

/// `v.clamp(lo, hi)`, with NaN mapped to `lo`.
fn clamp_or(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_nan() { lo } else { v.max(lo).min(hi) }
}

// ---------------------------------------------------------------------------
// Renderer → Surface boundary (in-memory only, never serialized)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Solid box painted with the style's background.
    Fill(Rect),
    /// Box outline.
    Stroke(Rect),
    Circle { center: Point, radius: f64, filled: bool },
    Line { from: Point, to: Point },
    Text { at: Point, text: String, align: Align },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCmd {
    pub prim: Primitive,
    pub style: Style,
    pub z_order: i32,
}

impl DrawCmd {
    pub fn fill(rect: Rect, style: Style, z_order: i32) -> Self {
        DrawCmd { prim: Primitive::Fill(rect), style, z_order }
    }

    pub fn stroke(rect: Rect, style: Style, z_order: i32) -> Self {
        DrawCmd { prim: Primitive::Stroke(rect), style, z_order }
    }

    pub fn circle(center: Point, radius: f64, filled: bool, style: Style, z_order: i32) -> Self {
        DrawCmd { prim: Primitive::Circle { center, radius, filled }, style, z_order }
    }

    pub fn line(from: Point, to: Point, style: Style, z_order: i32) -> Self {
        DrawCmd { prim: Primitive::Line { from, to }, style, z_order }
    }

    pub fn text(at: Point, text: impl Into<String>, align: Align, style: Style, z_order: i32) -> Self {
        DrawCmd {
            prim: Primitive::Text { at, text: text.into(), align },
            style,
            z_order,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    pub cmds: Vec<DrawCmd>,
}
