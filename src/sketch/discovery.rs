use crate::input::Command;
use crate::renderer::{RenderContext, ACCENT, ERROR, MUTED, TEXT, Z_SCENE};
use crate::scene::region::Behavior;
use crate::types::{Align, DrawCmd, Point, Rect, Style};

use super::Sketch;

/// One stage of the guided discovery path.
pub struct Step {
    pub name: &'static str,
    /// What a teacher might say to the student at this step.
    pub example: &'static str,
    pub detail: &'static str,
}

pub const STEPS: [Step; 9] = [
    Step {
        name: "Pose Question",
        example: "What affects how fast a pendulum swings?",
        detail: "Start with a clear, focused question that guides exploration.",
    },
    Step {
        name: "Constrain Variables",
        example: "Focus on length only - mass and amplitude are locked",
        detail: "Limit variables to prevent confusion and focus discovery.",
    },
    Step {
        name: "Explore Freely",
        example: "Change the length slider and watch what happens",
        detail: "Allow hands-on exploration within the constrained space.",
    },
    Step {
        name: "Prompt Observation",
        example: "What pattern do you notice? Longer means...",
        detail: "Guide attention to key patterns without giving answers.",
    },
    Step {
        name: "Form Hypothesis",
        example: "Complete: I think longer pendulums swing [slower/faster]",
        detail: "Encourage explicit prediction to deepen engagement.",
    },
    Step {
        name: "Test Prediction",
        example: "Try extreme values - very short and very long",
        detail: "Systematic testing builds confidence in the discovery.",
    },
    Step {
        name: "Confirm Discovery",
        example: "You discovered it! Longer = slower period",
        detail: "Validate the student's insight with positive feedback.",
    },
    Step {
        name: "Connect to Theory",
        example: "This relationship follows T = 2π√(L/g)",
        detail: "Link experiential discovery to formal knowledge.",
    },
    Step {
        name: "Transfer",
        example: "Apply this to predict: a 4m pendulum vs 1m...",
        detail: "Apply the concept to new contexts to build transfer.",
    },
];

/// Flag that shows what goes wrong when a step is skipped.
pub const SHOW_COMPARISON: &str = "show_comparison";

/// Cycled through by step index.
pub const WARNINGS: [&str; 4] = [
    "Students may never discover the concept",
    "Risk of forming misconceptions",
    "Wasted cognitive resources",
    "Frustration and disengagement",
];

pub fn warning(step: usize) -> &'static str {
    WARNINGS[step % WARNINGS.len()]
}

/// A row of step nodes joined by a path, with a detail panel for the
/// selected step. Selection and auto-advance are handled generically.
pub struct GuidedDiscovery;

impl Sketch for GuidedDiscovery {
    fn draw(&self, ctx: &RenderContext<'_>, cmds: &mut Vec<DrawCmd>) {
        let state = ctx.state;

        // Path segments between consecutive nodes, highlighted up to the
        // selected step.
        let nodes: Vec<(usize, Point)> = ctx
            .regions
            .iter()
            .filter_map(|r| match &r.behavior {
                Behavior::Button { command: Some(Command::Select { index }), .. } => {
                    Some((*index, r.bounds.center()))
                }
                _ => None,
            })
            .collect();
        for pair in nodes.windows(2) {
            let (from_index, from) = pair[0];
            let (_, to) = pair[1];
            let color = if from_index < state.selected() { ACCENT } else { MUTED };
            cmds.push(DrawCmd::line(from, to, Style::fg(color), Z_SCENE));
        }

        let Some(step) = STEPS.get(state.selected()) else {
            return;
        };
        let area = ctx.viewport.draw_area();
        let x = area.x + area.w / 2.0;
        let y = area.y + 7.0;
        let lines = [
            (
                format!("Step {} of {}: {}", state.selected() + 1, STEPS.len(), step.name),
                Style::fg(TEXT).bold(),
            ),
            (format!("Example: \"{}\"", step.example), Style::fg(TEXT)),
            (step.detail.to_string(), Style::fg(MUTED)),
        ];
        for (row, (text, style)) in lines.into_iter().enumerate() {
            cmds.push(DrawCmd::text(Point::new(x, y + row as f64), text, Align::Center, style, Z_SCENE));
        }
        if let Some((_, hint)) = ctx.hovered_hint() {
            cmds.push(DrawCmd::text(
                Point::new(x, y + 4.0),
                hint,
                Align::Center,
                Style::fg(MUTED),
                Z_SCENE,
            ));
        }

        if state.flag(SHOW_COMPARISON) {
            let panel = Rect::new(x - 22.0, y + 6.0, 44.0, 4.0);
            cmds.push(DrawCmd::stroke(panel, Style::fg(ERROR), Z_SCENE));
            cmds.push(DrawCmd::text(
                Point::new(x, panel.y + 1.0),
                "Without This Step",
                Align::Center,
                Style::fg(ERROR).bold(),
                Z_SCENE + 1,
            ));
            cmds.push(DrawCmd::text(
                Point::new(x, panel.y + 2.0),
                warning(state.selected()),
                Align::Center,
                Style::fg(TEXT),
                Z_SCENE + 1,
            ));
        }
    }
}
