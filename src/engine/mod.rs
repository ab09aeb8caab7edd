//! Engine: one running sketch.
//!
//! Owns the validated config, the sketch behavior, sketch state, interaction
//! state and the regions for the current viewport, and exposes the host
//! contract: resize, pointer, key, tick, frame. Several engines can live side
//! by side; nothing here is global.

use crate::clock::{self, ClockEvent};
use crate::error::ConfigError;
use crate::input::{self, Command, Key};
use crate::layout::{self, Viewport};
use crate::renderer::{RenderContext, Renderer};
use crate::scene::region::Region;
use crate::scene::state::{InteractionState, SketchState};
use crate::scene::SketchConfig;
use crate::sketch::{self, Sketch};
use crate::types::{Frame, Point};

/// Most recent applied commands kept in the engine's log.
pub const HISTORY_LIMIT: usize = 256;

pub struct Engine {
    config: SketchConfig,
    sketch: Box<dyn Sketch>,
    viewport: Viewport,
    regions: Vec<Region>,
    state: SketchState,
    interaction: InteractionState,
    history: Vec<Command>,
}

impl Engine {
    /// Validate `config` and build an engine at the config's default size.
    pub fn init(config: SketchConfig, sketch: Box<dyn Sketch>) -> Result<Self, ConfigError> {
        config.validate()?;

        let vp = config.viewport;
        let viewport = Viewport::new(vp.width, vp.height, vp.control_height)
            .clamped(&config.min_viewport());
        let mut state = SketchState::from_config(&config);
        if let (Some(clock), Some(spec)) = (state.clock.as_mut(), config.clock.as_ref()) {
            if let Some(flag) = &spec.loop_flag {
                clock.looping = config.flags.iter().any(|f| &f.name == flag && f.default);
            }
        }

        let mut engine = Engine {
            regions: Vec::new(),
            config,
            sketch,
            viewport,
            state,
            interaction: InteractionState::default(),
            history: Vec::new(),
        };
        engine.relayout();

        tracing::info!(
            sketch = %engine.config.name,
            regions = engine.regions.len(),
            width = viewport.width,
            height = viewport.height,
            "engine initialized"
        );
        Ok(engine)
    }

    /// Build an engine with the behavior the config names.
    pub fn from_config(config: SketchConfig) -> Result<Self, ConfigError> {
        let sketch = sketch::behavior_for(&config);
        Self::init(config, sketch)
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn state(&self) -> &SketchState {
        &self.state
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Commands applied so far, oldest first, up to `HISTORY_LIMIT`.
    pub fn commands(&self) -> &[Command] {
        &self.history
    }

    fn relayout(&mut self) {
        self.regions = layout::layout(&self.viewport, &self.config.regions);
    }

    pub fn on_resize(&mut self, width: f64, height: f64) {
        let requested = Viewport::new(width, height, self.config.viewport.control_height);
        self.viewport = requested.clamped(&self.config.min_viewport());
        self.relayout();
        // Geometry moved under the pointer; the old hover target is stale.
        self.interaction.hovered = None;
        tracing::debug!(
            width = self.viewport.width,
            height = self.viewport.height,
            "viewport resized"
        );
    }

    pub fn on_pointer_down(&mut self, x: f64, y: f64) -> Option<Command> {
        self.relayout();
        let cmd = input::pointer_down(&mut self.interaction, &self.regions, &self.state, Point::new(x, y))?;
        self.apply(&cmd);
        Some(cmd)
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Option<Command> {
        self.relayout();
        let cmd = input::pointer_move(&mut self.interaction, &self.regions, &self.state, Point::new(x, y))?;
        self.apply(&cmd);
        Some(cmd)
    }

    pub fn on_pointer_up(&mut self, x: f64, y: f64) -> Option<Command> {
        self.relayout();
        let cmd = input::pointer_up(&mut self.interaction, &self.regions, Point::new(x, y))?;
        self.apply(&cmd);
        Some(cmd)
    }

    pub fn on_key(&mut self, key: Key) -> Option<Command> {
        let cmd = input::key_press(&self.config.keys, self.config.text_input, key)?;
        self.apply(&cmd);
        Some(cmd)
    }

    /// Apply a command's generic meaning, then let the sketch react.
    pub fn apply(&mut self, cmd: &Command) {
        tracing::debug!(command = cmd.name(), "apply");
        let state = &mut self.state;
        match cmd {
            Command::TogglePlay => {
                if let Some(c) = state.clock.as_mut() {
                    c.toggle();
                }
            }
            Command::Restart => {
                if let Some(c) = state.clock.as_mut() {
                    c.restart();
                }
            }
            Command::StepBack => {
                if let Some(c) = state.clock.as_mut() {
                    c.step_by(-c.step);
                }
            }
            Command::StepForward => {
                if let Some(c) = state.clock.as_mut() {
                    c.step_by(c.step);
                }
            }
            Command::SetSlider { field, value } => {
                if !state.set(field, *value) {
                    tracing::debug!(%field, value, "slider value rejected");
                }
            }
            Command::Toggle { flag } => {
                let on = state.toggle_flag(flag);
                let loop_flag = self.config.clock.as_ref().and_then(|c| c.loop_flag.as_deref());
                if let (Some(on), Some(clock)) = (on, state.clock.as_mut()) {
                    if loop_flag == Some(flag.as_str()) {
                        clock.looping = on;
                    }
                }
            }
            Command::Select { index } => state.select(*index),
            Command::SelectNext => state.select_next(),
            Command::SelectPrev => state.select_prev(),
            Command::Type { ch } => {
                state.push_char(*ch);
            }
            Command::Erase => state.erase(),
            Command::AutoAdvance => {
                if let Some(auto) = state.auto.as_mut() {
                    let (handle, previous) = auto.start();
                    tracing::info!(?handle, ?previous, "auto-advance started");
                }
            }
            Command::Reset => {
                if let Some(handle) = state.auto.as_mut().and_then(|a| a.cancel()) {
                    tracing::info!(?handle, "auto-advance cancelled");
                }
                state.select(0);
                if let Some(c) = state.clock.as_mut() {
                    c.restart();
                }
                state.input.clear();
                state.message = None;
            }
            Command::Drop { zone, item } => state.place(item, zone),
            Command::Submit | Command::Action { .. } => {}
        }
        self.sketch.on_command(cmd, &mut self.state);

        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(cmd.clone());
    }

    /// Advance time-driven state by one frame.
    pub fn tick(&mut self, delta: f64) {
        self.relayout();

        let max_step = self
            .config
            .clock
            .as_ref()
            .map_or(crate::scene::DEFAULT_MAX_STEP, |c| c.max_step);
        let dt = clock::cap_delta(delta, max_step);

        let speed = self
            .config
            .clock
            .as_ref()
            .and_then(|c| c.speed_field.as_deref())
            .and_then(|f| self.state.value(f))
            .unwrap_or(1.0);
        if let Some(c) = self.state.clock.as_mut() {
            if c.advance(dt, speed) == Some(ClockEvent::Finished) {
                tracing::info!(time = c.time, "clock reached the end and stopped");
            }
        }

        clock::advance_selection(&mut self.state, dt);
        self.sketch.update(&mut self.state, dt);
    }

    pub fn frame(&self) -> Frame {
        let ctx = RenderContext {
            viewport: self.viewport,
            title: &self.config.title,
            regions: &self.regions,
            state: &self.state,
            interaction: &self.interaction,
        };
        Renderer::render(&ctx, self.sketch.as_ref())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
