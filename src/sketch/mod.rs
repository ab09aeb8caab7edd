//! Sketches: per-visualization behavior attached to a config.
//!
//! Each sketch lives in its own module with its config JSON beside it under
//! `sketches/`. The generic layer (regions, clock, dispatcher) does most of
//! the work; a sketch only adds scene drawing and the few reactions that are
//! specific to its subject.

mod control_panel;
mod discovery;
mod generic;
mod pendulum;

pub use control_panel::ControlPanel;
pub use discovery::GuidedDiscovery;
pub use generic::Generic;
pub use pendulum::PendulumPeriod;

use crate::input::Command;
use crate::renderer::RenderContext;
use crate::scene::state::SketchState;
use crate::scene::SketchConfig;
use crate::types::DrawCmd;

pub trait Sketch {
    /// Per-frame update after the clock has advanced. `dt` is already capped.
    fn update(&mut self, _state: &mut SketchState, _dt: f64) {}

    /// React to a command after the engine applied its generic meaning.
    fn on_command(&mut self, _cmd: &Command, _state: &mut SketchState) {}

    /// Draw the scene content. Must not depend on anything outside `ctx`
    /// and `self`.
    fn draw(&self, ctx: &RenderContext<'_>, cmds: &mut Vec<DrawCmd>);
}

pub struct Builtin {
    pub name: &'static str,
    pub summary: &'static str,
    config: &'static str,
    make: fn() -> Box<dyn Sketch>,
}

impl Builtin {
    pub fn config(&self) -> Result<SketchConfig, serde_json::Error> {
        SketchConfig::from_json(self.config)
    }

    pub fn sketch(&self) -> Box<dyn Sketch> {
        (self.make)()
    }
}

fn make_control_panel() -> Box<dyn Sketch> {
    Box::new(ControlPanel)
}

fn make_pendulum() -> Box<dyn Sketch> {
    Box::new(PendulumPeriod::default())
}

fn make_discovery() -> Box<dyn Sketch> {
    Box::new(GuidedDiscovery)
}

pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "animation-control-panel",
        summary: "Transport controls, scrubber, speed and loop for a swinging pendulum",
        config: include_str!("../../sketches/animation-control-panel.json"),
        make: make_control_panel,
    },
    Builtin {
        name: "pendulum-period",
        summary: "Calculate a pendulum's period and check the answer",
        config: include_str!("../../sketches/pendulum-period.json"),
        make: make_pendulum,
    },
    Builtin {
        name: "guided-discovery",
        summary: "Step through a guided discovery learning path",
        config: include_str!("../../sketches/guided-discovery.json"),
        make: make_discovery,
    },
];

pub fn find(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|b| b.name == name)
}

/// The behavior a config asks for, falling back to the generic one when it
/// names no built-in (or an unknown one).
pub fn behavior_for(config: &SketchConfig) -> Box<dyn Sketch> {
    match config.sketch.as_deref().and_then(find) {
        Some(builtin) => builtin.sketch(),
        None => {
            if let Some(name) = &config.sketch {
                tracing::warn!(sketch = %name, "unknown sketch behavior, using generic");
            }
            Box::new(Generic)
        }
    }
}
