//! Mutable runtime state: the sketch's own values and the transient pointer
//! interaction. Both are owned by one `Engine` and never shared.

use crate::clock::{AutoAdvance, Clock};
use crate::types::Point;

use super::SketchConfig;

/// A numeric value with a declared closed domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl Field {
    pub fn new(value: f64, min: f64, max: f64) -> Self {
        Field { value: value.clamp(min, max), min, max }
    }

    /// Store `value` clamped to the domain. Non-finite values are rejected and
    /// leave the field untouched.
    pub fn set(&mut self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        self.value = value.clamp(self.min, self.max);
        true
    }

    /// Position of the value within its domain, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        (self.value - self.min) / (self.max - self.min)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub tone: Tone,
}

pub struct SketchState {
    fields: Vec<(String, Field)>,
    units: Vec<(String, String)>,
    flags: Vec<(String, bool)>,
    pub clock: Option<Clock>,
    clock_field: Option<String>,
    pub auto: Option<AutoAdvance>,
    selected: usize,
    selections: usize,
    /// Typed numeric answer; only digits and a single `.` are ever stored.
    pub input: String,
    pub message: Option<Message>,
    /// `(item, zone)` pairs placed by drag and drop, most recent last.
    pub placements: Vec<(String, String)>,
}

impl SketchState {
    pub fn from_config(config: &SketchConfig) -> Self {
        let fields = config
            .fields
            .iter()
            .map(|f| (f.name.clone(), Field::new(f.default, f.min, f.max)))
            .collect();
        let units = config
            .fields
            .iter()
            .filter_map(|f| f.unit.clone().map(|u| (f.name.clone(), u)))
            .collect();
        let flags = config.flags.iter().map(|f| (f.name.clone(), f.default)).collect();

        SketchState {
            fields,
            units,
            flags,
            clock: config.clock.as_ref().map(Clock::from_spec),
            clock_field: config.clock.as_ref().map(|c| c.field.clone()),
            auto: config.auto_advance.as_ref().map(|a| AutoAdvance::new(a.interval)),
            selected: 0,
            selections: config.selections,
            input: String::new(),
            message: None,
            placements: Vec::new(),
        }
    }

    fn is_clock_field(&self, name: &str) -> bool {
        self.clock_field.as_deref() == Some(name)
    }

    /// Current value of a field, or of the clock's time when `name` is the
    /// clock field.
    pub fn value(&self, name: &str) -> Option<f64> {
        if self.is_clock_field(name) {
            return self.clock.as_ref().map(|c| c.time);
        }
        self.field(name).map(|f| f.value)
    }

    /// Domain of a field (or `[0, cycle]` for the clock field).
    pub fn domain(&self, name: &str) -> Option<(f64, f64)> {
        if self.is_clock_field(name) {
            return self.clock.as_ref().map(|c| (0.0, c.cycle));
        }
        self.field(name).map(|f| (f.min, f.max))
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(n, f)| (n.as_str(), f))
    }

    pub fn unit(&self, name: &str) -> Option<&str> {
        self.units.iter().find(|(n, _)| n == name).map(|(_, u)| u.as_str())
    }

    /// Write a value, clamped to its domain. Writing the clock field seeks the
    /// clock. Returns false for unknown names and non-finite values.
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        if self.is_clock_field(name) {
            return self.clock.as_mut().is_some_and(|c| c.seek(value));
        }
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, field)) => field.set(value),
            None => false,
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.iter().any(|(n, v)| n == name && *v)
    }

    pub fn flags(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Flip a flag and return its new value; `None` for unknown flags.
    pub fn toggle_flag(&mut self, name: &str) -> Option<bool> {
        let (_, value) = self.flags.iter_mut().find(|(n, _)| n == name)?;
        *value = !*value;
        Some(*value)
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selections(&self) -> usize {
        self.selections
    }

    pub fn is_last_selected(&self) -> bool {
        self.selected + 1 >= self.selections
    }

    /// Select `index`, clamped to the last item. No-op when nothing is selectable.
    pub fn select(&mut self, index: usize) {
        if self.selections > 0 {
            self.selected = index.min(self.selections - 1);
        }
    }

    pub fn select_next(&mut self) {
        self.select(self.selected.saturating_add(1));
    }

    pub fn select_prev(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    /// Append a typed character. Only digits and the first `.` are accepted.
    pub fn push_char(&mut self, ch: char) -> bool {
        let accepted = ch.is_ascii_digit() || (ch == '.' && !self.input.contains('.'));
        if accepted {
            self.input.push(ch);
        }
        accepted
    }

    pub fn erase(&mut self) {
        self.input.pop();
    }

    pub fn set_message(&mut self, text: impl Into<String>, tone: Tone) {
        self.message = Some(Message { text: text.into(), tone });
    }

    /// Record that `item` was dropped on `zone`, replacing any earlier
    /// placement of the same item.
    pub fn place(&mut self, item: &str, zone: &str) {
        self.placements.retain(|(i, _)| i != item);
        self.placements.push((item.to_string(), zone.to_string()));
    }

    pub fn placement(&self, item: &str) -> Option<&str> {
        self.placements.iter().find(|(i, _)| i == item).map(|(_, z)| z.as_str())
    }
}

/// Transient pointer state, reset whenever a drag ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    pub hovered: Option<String>,
    pub dragged: Option<String>,
    pub pointer: Option<Point>,
}

impl InteractionState {
    pub fn is_hovered(&self, id: &str) -> bool {
        self.hovered.as_deref() == Some(id)
    }

    pub fn is_dragged(&self, id: &str) -> bool {
        self.dragged.as_deref() == Some(id)
    }

    /// Start dragging `id`, replacing any previous drag.
    pub fn begin_drag(&mut self, id: &str) {
        self.dragged = Some(id.to_string());
    }

    pub fn end_drag(&mut self) -> Option<String> {
        self.dragged.take()
    }
}
