//! Region specs: the declarative description of one interactive area.
//!
//! Specs say *where* a region sits relative to the viewport and *what kind*
//! of control it is. The layout engine resolves them into `Region`s with
//! concrete pixel bounds.

use serde::{Deserialize, Serialize};

use crate::input::Command;
use crate::types::{Point, Rect, Style};

// ---------------------------------------------------------------------------
// Lengths
// ---------------------------------------------------------------------------

/// A length along one axis of an anchor area: `frac * extent + px`.
///
/// Accepts a plain number (`30` → 30px), a percentage string (`"50%"`), or a
/// full object (`{"frac": 1.0, "px": -40}` → 40px short of the far edge).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Length {
    pub frac: f64,
    pub px: f64,
}

impl Length {
    pub const fn px(px: f64) -> Self {
        Length { frac: 0.0, px }
    }

    pub const fn frac(frac: f64) -> Self {
        Length { frac, px: 0.0 }
    }

    pub fn resolve(&self, extent: f64) -> f64 {
        self.frac * extent + self.px
    }
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D>(d: D) -> Result<Length, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{Error, MapAccess, Visitor};
        use std::fmt;

        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct LengthRepr {
            #[serde(default)]
            frac: f64,
            #[serde(default)]
            px: f64,
        }

        struct LengthVisitor;

        impl<'de> Visitor<'de> for LengthVisitor {
            type Value = Length;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a number, a percentage string, or a {frac, px} object")
            }

            fn visit_u64<E: Error>(self, v: u64) -> Result<Length, E> {
                Ok(Length::px(v as f64))
            }

            fn visit_i64<E: Error>(self, v: i64) -> Result<Length, E> {
                Ok(Length::px(v as f64))
            }

            fn visit_f64<E: Error>(self, v: f64) -> Result<Length, E> {
                finite(Length::px(v))
            }

            fn visit_str<E: Error>(self, v: &str) -> Result<Length, E> {
                let pct = v
                    .trim()
                    .strip_suffix('%')
                    .ok_or_else(|| E::custom(format!("expected a percentage like \"50%\", got {v:?}")))?;
                let pct: f64 = pct
                    .trim()
                    .parse()
                    .map_err(|_| E::custom(format!("invalid percentage {v:?}")))?;
                finite(Length::frac(pct / 100.0))
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Length, A::Error> {
                let repr = LengthRepr::deserialize(serde::de::value::MapAccessDeserializer::new(map))?;
                finite(Length { frac: repr.frac, px: repr.px })
            }
        }

        fn finite<E: Error>(len: Length) -> Result<Length, E> {
            if len.frac.is_finite() && len.px.is_finite() {
                Ok(len)
            } else {
                Err(E::custom(format!("length must be finite, got {len:?}")))
            }
        }

        d.deserialize_any(LengthVisitor)
    }
}

// ---------------------------------------------------------------------------
// Region spec
// ---------------------------------------------------------------------------

/// Which part of the viewport a region's lengths are measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Canvas,
    #[default]
    Draw,
    Control,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    #[default]
    Rect,
    /// The circle inscribed in the bounding box.
    Circle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Behavior {
    Button {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        command: Option<Command>,
        /// Draggable buttons emit nothing on press; releasing them over a
        /// drop zone emits `Command::Drop`.
        #[serde(default)]
        draggable: bool,
    },
    Slider {
        field: String,
        #[serde(default = "default_decimals")]
        decimals: usize,
    },
    Toggle {
        flag: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        on_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        off_label: Option<String>,
    },
    DropZone,
}

fn default_decimals() -> usize {
    2
}

fn default_true() -> bool {
    true
}

impl Behavior {
    pub fn is_draggable(&self) -> bool {
        matches!(self, Behavior::Slider { .. } | Behavior::Button { draggable: true, .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSpec {
    pub id: String,
    #[serde(default)]
    pub anchor: Anchor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<Length>,
    #[serde(default)]
    pub shape: Shape,
    #[serde(default)]
    pub label: String,
    /// One-line description shown while the region is hovered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default)]
    pub style: Style,
    pub behavior: Behavior,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl RegionSpec {
    /// The first bound that was left out of the spec, if any.
    pub fn missing_bound(&self) -> Option<&'static str> {
        [("x", &self.x), ("y", &self.y), ("w", &self.w), ("h", &self.h)]
            .into_iter()
            .find(|(_, v)| v.is_none())
            .map(|(name, _)| name)
    }
}

// ---------------------------------------------------------------------------
// Resolved region
// ---------------------------------------------------------------------------

/// A region with pixel bounds for the current viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: String,
    pub bounds: Rect,
    pub shape: Shape,
    pub label: String,
    pub hint: Option<String>,
    pub style: Style,
    pub behavior: Behavior,
    pub enabled: bool,
}

impl Region {
    pub fn contains(&self, p: Point) -> bool {
        match self.shape {
            Shape::Rect => self.bounds.contains(p),
            Shape::Circle => {
                let radius = self.bounds.w.min(self.bounds.h) / 2.0;
                p.distance(self.bounds.center()) <= radius
            }
        }
    }
}
