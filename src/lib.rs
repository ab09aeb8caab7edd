//! MicroSim: interactive educational sketches with a declarative control
//! panel.
//!
//! A sketch is a JSON `SketchConfig` (fields, flags, clock, regions, key map)
//! plus an optional `Sketch` behavior. The `Engine` lays regions out for the
//! viewport, hit-tests pointer input into `Command`s, advances the clock, and
//! hands the renderer everything it needs to produce a `Frame`.

pub mod backend;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod layout;
pub mod renderer;
pub mod scene;
pub mod sketch;
pub mod types;
