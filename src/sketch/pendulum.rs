use std::f64::consts::PI;

use crate::input::Command;
use crate::renderer::{RenderContext, ACCENT, ERROR, MUTED, SUCCESS, TEXT, Z_SCENE};
use crate::scene::state::{SketchState, Tone};
use crate::types::{Align, DrawCmd, Point, Rect, Style};

use super::Sketch;

const LENGTH: &str = "length";
const GRAVITY: &str = "gravity";
const SHOW_STEPS: &str = "show_steps";

/// Relative error below which an answer counts as correct.
const TOLERANCE: f64 = 0.05;
const START_ANGLE: f64 = PI / 6.0;

/// Small-angle period of a simple pendulum, in seconds.
pub fn period(length: f64, gravity: f64) -> f64 {
    2.0 * PI * (length / gravity).sqrt()
}

/// Outcome of checking a typed answer against the expected period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Invalid,
    Correct,
    Incorrect,
}

pub fn check_answer(input: &str, expected: f64) -> Verdict {
    match input.trim().parse::<f64>() {
        Ok(answer) if answer.is_finite() => {
            if ((answer - expected) / expected).abs() < TOLERANCE {
                Verdict::Correct
            } else {
                Verdict::Incorrect
            }
        }
        _ => Verdict::Invalid,
    }
}

/// A swinging pendulum next to a period calculator the learner fills in.
pub struct PendulumPeriod {
    angle: f64,
    velocity: f64,
}

impl Default for PendulumPeriod {
    fn default() -> Self {
        PendulumPeriod { angle: START_ANGLE, velocity: 0.0 }
    }
}

impl PendulumPeriod {
    pub fn angle(&self) -> f64 {
        self.angle
    }

    fn length_and_gravity(state: &SketchState) -> (f64, f64) {
        (
            state.value(LENGTH).unwrap_or(1.0),
            state.value(GRAVITY).unwrap_or(9.8),
        )
    }

    fn submit(state: &mut SketchState) {
        let (length, gravity) = Self::length_and_gravity(state);
        let expected = period(length, gravity);
        match check_answer(&state.input, expected) {
            Verdict::Invalid => state.set_message("Please enter a valid number.", Tone::Error),
            Verdict::Correct => state.set_message(
                "✓ Correct! Your answer is within 5% of the actual period.",
                Tone::Success,
            ),
            Verdict::Incorrect => state.set_message(
                format!(
                    "✗ Not quite. Check your calculation. Hint: T = 2π√({length:.2}/{gravity:.1})"
                ),
                Tone::Error,
            ),
        }
    }
}

impl Sketch for PendulumPeriod {
    fn update(&mut self, state: &mut SketchState, dt: f64) {
        let (length, gravity) = Self::length_and_gravity(state);
        if dt <= 0.0 || length <= 0.0 {
            return;
        }
        // Semi-implicit Euler keeps the swing stable at frame-sized steps.
        let accel = -(gravity / length) * self.angle.sin();
        self.velocity += accel * dt;
        self.velocity *= 0.999_f64.powf(dt * 60.0);
        self.angle = (self.angle + self.velocity * dt).clamp(-PI, PI);
    }

    fn on_command(&mut self, cmd: &Command, state: &mut SketchState) {
        match cmd {
            Command::Submit => Self::submit(state),
            Command::SetSlider { .. } => state.message = None,
            Command::Reset => *self = PendulumPeriod::default(),
            _ => {}
        }
    }

    fn draw(&self, ctx: &RenderContext<'_>, cmds: &mut Vec<DrawCmd>) {
        let area = ctx.viewport.draw_area();
        let state = ctx.state;
        let (length, gravity) = Self::length_and_gravity(state);

        // Left half: the pendulum, string length scaled to the field's domain.
        let half = Rect::new(area.x, area.y, area.w / 2.0, area.h);
        let pivot = Point::new(half.x + half.w / 2.0, half.y + 3.0);
        let fraction = state.field(LENGTH).map_or(0.5, |f| f.fraction());
        let rope = 2.0 + (half.h - 8.0).max(1.0) * fraction;
        let bob = Point::new(
            pivot.x + self.angle.sin() * rope * 2.0,
            pivot.y + self.angle.cos() * rope,
        );
        cmds.push(DrawCmd::line(
            Point::new(pivot.x - 5.0, pivot.y),
            Point::new(pivot.x + 5.0, pivot.y),
            Style::fg(MUTED),
            Z_SCENE,
        ));
        cmds.push(DrawCmd::line(pivot, bob, Style::fg(TEXT), Z_SCENE + 1));
        cmds.push(DrawCmd::circle(bob, 1.0, true, Style::fg(ACCENT), Z_SCENE + 2));

        // Right half: the calculator panel.
        let x = area.x + area.w / 2.0 + 2.0;
        let mut y = area.y + 3.0;
        let mut line = |text: String, style: Style, cmds: &mut Vec<DrawCmd>| {
            if y < area.bottom() - 1.0 {
                cmds.push(DrawCmd::text(Point::new(x, y), text, Align::Left, style, Z_SCENE));
            }
            y += 1.0;
        };

        line("Calculate the period T".into(), Style::fg(TEXT).bold(), cmds);
        line(format!("L = {length:.2} m"), Style::fg(TEXT), cmds);
        line(format!("g = {gravity:.2} m/s²"), Style::fg(TEXT), cmds);
        line(String::new(), Style::default(), cmds);

        let answer = if state.input.is_empty() {
            ("Type your answer...".to_string(), Style::fg(MUTED))
        } else {
            (format!("T = {} s", state.input), Style::fg(TEXT).bold())
        };
        line(answer.0, answer.1, cmds);

        if let Some(msg) = &state.message {
            let color = match msg.tone {
                Tone::Success => SUCCESS,
                Tone::Error => ERROR,
                Tone::Info => TEXT,
            };
            line(msg.text.clone(), Style::fg(color), cmds);
        }

        if state.flag(SHOW_STEPS) {
            let root = (length / gravity).sqrt();
            line(String::new(), Style::default(), cmds);
            line("T = 2π√(L/g)".into(), Style::fg(MUTED), cmds);
            line(format!("T = 2π√({length:.2}/{gravity:.1})"), Style::fg(MUTED), cmds);
            line(format!("T = 2π × {root:.3}"), Style::fg(MUTED), cmds);
            line(format!("T = {:.3} s", period(length, gravity)), Style::fg(MUTED), cmds);
        }
    }
}

#[cfg(test)]
#[path = "pendulum_test.rs"]
mod tests;
