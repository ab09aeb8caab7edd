//! Animation clock: time-driven state advanced once per frame.
//!
//! The clock knows nothing about input or drawing. It owns one time field with
//! a `{Stopped, Playing}` state machine, plus the optional auto-advance timer
//! that steps a selection forward at a fixed interval.

use crate::scene::state::SketchState;
use crate::scene::ClockSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Stopped,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// A looping field passed the end of its cycle and wrapped.
    Wrapped,
    /// A non-looping field reached its end and stopped.
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clock {
    pub time: f64,
    pub cycle: f64,
    pub looping: bool,
    pub state: PlayState,
    pub max_step: f64,
    pub step: f64,
}

/// Sanitize a frame delta: non-finite or negative deltas count as zero, and
/// large gaps (a backgrounded terminal, a debugger pause) are capped.
pub fn cap_delta(delta: f64, max_step: f64) -> f64 {
    if delta.is_finite() { delta.clamp(0.0, max_step) } else { 0.0 }
}

impl Clock {
    pub fn new(cycle: f64, looping: bool, max_step: f64) -> Self {
        Clock {
            time: 0.0,
            cycle,
            looping,
            state: PlayState::Stopped,
            max_step,
            step: 0.1,
        }
    }

    pub fn from_spec(spec: &ClockSpec) -> Self {
        Clock {
            step: spec.step,
            state: if spec.autoplay { PlayState::Playing } else { PlayState::Stopped },
            ..Clock::new(spec.cycle, spec.looping, spec.max_step)
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    /// Stopped → Playing. A non-looping clock sitting at its end rewinds first.
    pub fn start(&mut self) {
        if !self.looping && self.time >= self.cycle {
            self.time = 0.0;
        }
        self.state = PlayState::Playing;
    }

    pub fn pause(&mut self) {
        self.state = PlayState::Stopped;
    }

    pub fn toggle(&mut self) {
        match self.state {
            PlayState::Stopped => self.start(),
            PlayState::Playing => self.pause(),
        }
    }

    pub fn restart(&mut self) {
        self.time = 0.0;
        self.state = PlayState::Stopped;
    }

    /// Manual step (step back / step forward): pauses and clamps to the cycle.
    pub fn step_by(&mut self, dt: f64) {
        self.pause();
        self.seek(self.time + dt);
    }

    /// Jump to `t`, clamped to `[0, cycle]`. Rejects non-finite times.
    pub fn seek(&mut self, t: f64) -> bool {
        if !t.is_finite() {
            return false;
        }
        self.time = t.clamp(0.0, self.cycle);
        true
    }

    /// Advance by `delta * speed` when playing.
    pub fn advance(&mut self, delta: f64, speed: f64) -> Option<ClockEvent> {
        if !self.is_playing() {
            return None;
        }
        let speed = if speed.is_finite() { speed.max(0.0) } else { 0.0 };
        self.time += cap_delta(delta, self.max_step) * speed;

        if self.time < self.cycle {
            return None;
        }
        if self.looping {
            self.time = self.time.rem_euclid(self.cycle);
            Some(ClockEvent::Wrapped)
        } else {
            self.time = self.cycle;
            self.state = PlayState::Stopped;
            Some(ClockEvent::Finished)
        }
    }
}

// ---------------------------------------------------------------------------
// Auto-advance
// ---------------------------------------------------------------------------

/// Identifies one run of an auto-advance timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, PartialEq)]
struct Run {
    handle: TimerHandle,
    elapsed: f64,
}

/// A repeating timer driven by frame ticks. At most one run is active:
/// starting a new run cancels the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoAdvance {
    interval: f64,
    generation: u64,
    active: Option<Run>,
}

impl AutoAdvance {
    pub fn new(interval: f64) -> Self {
        AutoAdvance { interval, generation: 0, active: None }
    }

    /// Start a new run, returning its handle and the handle it replaced.
    pub fn start(&mut self) -> (TimerHandle, Option<TimerHandle>) {
        let previous = self.cancel();
        self.generation += 1;
        let handle = TimerHandle(self.generation);
        self.active = Some(Run { handle, elapsed: 0.0 });
        (handle, previous)
    }

    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.active.take().map(|run| run.handle)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.active.as_ref().map(|run| run.handle)
    }

    /// Advance the active run and return how many intervals elapsed.
    pub fn tick(&mut self, delta: f64) -> u32 {
        let Some(run) = self.active.as_mut() else {
            return 0;
        };
        if !(self.interval > 0.0) || !delta.is_finite() || delta <= 0.0 {
            return 0;
        }
        run.elapsed += delta;
        let fired = (run.elapsed / self.interval).floor();
        run.elapsed -= fired * self.interval;
        fired as u32
    }
}

/// Drive the auto-advance timer for one frame: every elapsed interval selects
/// the next item, and the run stops once the last item is selected.
pub fn advance_selection(state: &mut SketchState, delta: f64) -> u32 {
    let fired = match state.auto.as_mut() {
        Some(auto) => auto.tick(delta),
        None => return 0,
    };
    let mut advanced = 0;
    for _ in 0..fired {
        if state.is_last_selected() {
            break;
        }
        state.select_next();
        advanced += 1;
    }
    if state.is_last_selected() {
        if let Some(auto) = state.auto.as_mut() {
            if let Some(handle) = auto.cancel() {
                tracing::debug!(?handle, "auto-advance reached the last item");
            }
        }
    }
    advanced
}

#[cfg(test)]
#[path = "clock_test.rs"]
mod tests;
