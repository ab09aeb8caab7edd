//! Configuration errors surfaced by `Engine::init`.
//!
//! Every variant names the offending region/field so a broken sketch fails
//! loudly while it is being authored instead of rendering a broken control.

/// A sketch configuration that cannot be turned into a running engine.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    /// A region is missing one of `x`, `y`, `w`, `h`.
    #[error("region `{region}` is missing required bound `{bound}`")]
    MissingBounds { region: String, bound: &'static str },
    /// Two regions share the same id.
    #[error("duplicate region id `{0}`")]
    DuplicateRegion(String),
    /// A region id is empty.
    #[error("region at index {0} has an empty id")]
    EmptyRegionId(usize),
    /// A slider references a field that was never declared.
    #[error("slider `{region}` references unknown field `{field}`")]
    UnknownField { region: String, field: String },
    /// A toggle references a flag that was never declared.
    #[error("toggle `{region}` references unknown flag `{flag}`")]
    UnknownFlag { region: String, flag: String },
    /// A field's domain is empty, inverted, or not finite.
    #[error("field `{field}` has an invalid domain [{min}, {max}]")]
    InvalidDomain { field: String, min: f64, max: f64 },
    /// A field's default value lies outside its domain.
    #[error("field `{field}` default {value} lies outside [{min}, {max}]")]
    DefaultOutOfRange { field: String, value: f64, min: f64, max: f64 },
    /// Two fields (or a field and the clock) share the same name.
    #[error("duplicate field name `{0}`")]
    DuplicateField(String),
    /// The clock cycle length must be positive and finite.
    #[error("clock cycle must be positive, got {0}")]
    InvalidCycle(f64),
    /// The clock's per-frame step cap must be positive and finite.
    #[error("clock max_step must be positive, got {0}")]
    InvalidMaxStep(f64),
    /// The clock names a speed field or loop flag that does not exist.
    #[error("clock references unknown {kind} `{name}`")]
    UnknownClockBinding { kind: &'static str, name: String },
    /// A button or key binding sets a field that was never declared.
    #[error("{origin} sets unknown field `{field}`")]
    CommandField { origin: String, field: String },
    /// A button or key binding toggles a flag that was never declared.
    #[error("{origin} toggles unknown flag `{flag}`")]
    CommandFlag { origin: String, flag: String },
    /// A button or key binding selects past the last selectable item.
    #[error("{origin} selects index {index} but only {selections} items are selectable")]
    CommandSelect { origin: String, index: usize, selections: usize },
    /// A region resolved to zero width or height at the minimum viewport.
    #[error("region `{0}` has no area at the minimum viewport size")]
    EmptyRegion(String),
    /// The minimum viewport cannot hold the control strip.
    #[error("viewport minimum {min_width}x{min_height} is too small for a {control_height}px control area")]
    InvalidViewport { min_width: f64, min_height: f64, control_height: f64 },
}
