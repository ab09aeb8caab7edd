//! Scene model: the human-authored sketch configuration.
//!
//! A `SketchConfig` says *what exists* (fields, flags, regions, clock) and how
//! input maps onto it. It is plain data loaded from JSON; the engine validates
//! it once at initialization and never mutates it afterwards.

pub mod region;
pub mod state;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input::{Command, Key};
use crate::layout::{self, Viewport};

pub use region::{Anchor, Behavior, Length, Region, RegionSpec, Shape};
pub use state::{Field, InteractionState, Message, SketchState, Tone};

/// Largest frame delta, in seconds, applied in a single tick.
pub const DEFAULT_MAX_STEP: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchConfig {
    pub name: String,
    #[serde(default)]
    pub title: String,
    /// Built-in behavior to attach; `None` runs the generic behavior.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sketch: Option<String>,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub flags: Vec<FlagSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock: Option<ClockSpec>,
    /// Number of selectable items (steps, nodes); `selected` stays below it.
    #[serde(default)]
    pub selections: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_advance: Option<AutoAdvanceSpec>,
    /// Whether digits, `.`, Backspace and Enter feed a typed numeric answer.
    #[serde(default)]
    pub text_input: bool,
    #[serde(default)]
    pub keys: Vec<KeyBinding>,
    pub regions: Vec<RegionSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_control_height")]
    pub control_height: f64,
    #[serde(default = "default_min_width")]
    pub min_width: f64,
    #[serde(default = "default_min_height")]
    pub min_height: f64,
}

fn default_width() -> f64 { 100.0 }
fn default_height() -> f64 { 30.0 }
fn default_control_height() -> f64 { 5.0 }
fn default_min_width() -> f64 { 40.0 }
fn default_min_height() -> f64 { 12.0 }

impl Default for ViewportConfig {
    fn default() -> Self {
        ViewportConfig {
            width: default_width(),
            height: default_height(),
            control_height: default_control_height(),
            min_width: default_min_width(),
            min_height: default_min_height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    /// Display unit appended by the generic renderer, e.g. `"m"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagSpec {
    pub name: String,
    #[serde(default)]
    pub default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockSpec {
    /// Name under which the clock's time is exposed to sliders.
    #[serde(default = "default_clock_field")]
    pub field: String,
    pub cycle: f64,
    #[serde(default)]
    pub looping: bool,
    /// Flag that mirrors `looping` when toggled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_flag: Option<String>,
    /// Field whose value scales elapsed time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_field: Option<String>,
    #[serde(default = "default_max_step")]
    pub max_step: f64,
    /// Increment used by step back / step forward.
    #[serde(default = "default_step")]
    pub step: f64,
    #[serde(default)]
    pub autoplay: bool,
}

fn default_clock_field() -> String { "time".into() }
fn default_max_step() -> f64 { DEFAULT_MAX_STEP }
fn default_step() -> f64 { 0.1 }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoAdvanceSpec {
    /// Seconds between advances.
    pub interval: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: Key,
    pub command: Command,
}

impl SketchConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn min_viewport(&self) -> Viewport {
        Viewport::new(
            self.viewport.min_width,
            self.viewport.min_height,
            self.viewport.control_height,
        )
    }

    /// Check every invariant the engine relies on. Called by `Engine::init`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let vp = &self.viewport;
        if !(vp.min_width > 0.0 && vp.min_height > vp.control_height && vp.control_height >= 0.0) {
            return Err(ConfigError::InvalidViewport {
                min_width: vp.min_width,
                min_height: vp.min_height,
                control_height: vp.control_height,
            });
        }

        let mut field_names = HashSet::new();
        for field in &self.fields {
            if !field_names.insert(field.name.as_str()) {
                return Err(ConfigError::DuplicateField(field.name.clone()));
            }
            if !(field.min.is_finite() && field.max.is_finite() && field.min < field.max) {
                return Err(ConfigError::InvalidDomain {
                    field: field.name.clone(),
                    min: field.min,
                    max: field.max,
                });
            }
            if !(field.min..=field.max).contains(&field.default) {
                return Err(ConfigError::DefaultOutOfRange {
                    field: field.name.clone(),
                    value: field.default,
                    min: field.min,
                    max: field.max,
                });
            }
        }
        let flag_names: HashSet<&str> = self.flags.iter().map(|f| f.name.as_str()).collect();

        if let Some(clock) = &self.clock {
            if !(clock.cycle.is_finite() && clock.cycle > 0.0) {
                return Err(ConfigError::InvalidCycle(clock.cycle));
            }
            if !(clock.max_step.is_finite() && clock.max_step > 0.0) {
                return Err(ConfigError::InvalidMaxStep(clock.max_step));
            }
            if !field_names.insert(clock.field.as_str()) {
                return Err(ConfigError::DuplicateField(clock.field.clone()));
            }
            if let Some(speed) = &clock.speed_field {
                if !field_names.contains(speed.as_str()) {
                    return Err(ConfigError::UnknownClockBinding { kind: "field", name: speed.clone() });
                }
            }
            if let Some(flag) = &clock.loop_flag {
                if !flag_names.contains(flag.as_str()) {
                    return Err(ConfigError::UnknownClockBinding { kind: "flag", name: flag.clone() });
                }
            }
        }

        let mut region_ids = HashSet::new();
        for (i, spec) in self.regions.iter().enumerate() {
            if spec.id.is_empty() {
                return Err(ConfigError::EmptyRegionId(i));
            }
            if !region_ids.insert(spec.id.as_str()) {
                return Err(ConfigError::DuplicateRegion(spec.id.clone()));
            }
            if let Some(bound) = spec.missing_bound() {
                return Err(ConfigError::MissingBounds { region: spec.id.clone(), bound });
            }
            match &spec.behavior {
                Behavior::Slider { field, .. } if !field_names.contains(field.as_str()) => {
                    return Err(ConfigError::UnknownField {
                        region: spec.id.clone(),
                        field: field.clone(),
                    });
                }
                Behavior::Toggle { flag, .. } if !flag_names.contains(flag.as_str()) => {
                    return Err(ConfigError::UnknownFlag {
                        region: spec.id.clone(),
                        flag: flag.clone(),
                    });
                }
                Behavior::Button { command: Some(cmd), .. } => {
                    self.check_command(cmd, &field_names, &flag_names, || format!("region `{}`", spec.id))?;
                }
                _ => {}
            }
        }
        for binding in &self.keys {
            self.check_command(&binding.command, &field_names, &flag_names, || {
                format!("key `{}`", binding.key)
            })?;
        }

        // Every region must keep a usable area even at the smallest viewport.
        for region in layout::layout(&self.min_viewport(), &self.regions) {
            if region.bounds.w <= 0.0 || region.bounds.h <= 0.0 {
                return Err(ConfigError::EmptyRegion(region.id));
            }
        }

        Ok(())
    }

    /// A command named in the config must point at something that exists.
    fn check_command(
        &self,
        cmd: &Command,
        fields: &HashSet<&str>,
        flags: &HashSet<&str>,
        origin: impl FnOnce() -> String,
    ) -> Result<(), ConfigError> {
        match cmd {
            Command::SetSlider { field, .. } if !fields.contains(field.as_str()) => {
                Err(ConfigError::CommandField { origin: origin(), field: field.clone() })
            }
            Command::Toggle { flag } if !flags.contains(flag.as_str()) => {
                Err(ConfigError::CommandFlag { origin: origin(), flag: flag.clone() })
            }
            Command::Select { index } if *index >= self.selections => Err(ConfigError::CommandSelect {
                origin: origin(),
                index: *index,
                selections: self.selections,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
