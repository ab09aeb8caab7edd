use serde::{Deserialize, Serialize};

/// A logical, state-mutating action emitted by the input dispatcher.
///
/// Regions and key bindings name commands declaratively in the sketch
/// config, e.g. `{"type": "toggle_play"}` or `{"type": "select", "index": 2}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    TogglePlay,
    Restart,
    StepBack,
    StepForward,
    SetSlider { field: String, value: f64 },
    Toggle { flag: String },
    Select { index: usize },
    SelectNext,
    SelectPrev,
    /// Append one character to the typed answer.
    Type { ch: char },
    Erase,
    Submit,
    AutoAdvance,
    /// Cancel auto-advance and return selection, clock and input to defaults.
    Reset,
    Drop { zone: String, item: String },
    /// Sketch-specific command with no generic meaning.
    Action { name: String },
}

impl Command {
    /// Short stable name used in logs and the status bar.
    pub fn name(&self) -> &str {
        match self {
            Command::TogglePlay => "toggle-play",
            Command::Restart => "restart",
            Command::StepBack => "step-back",
            Command::StepForward => "step-forward",
            Command::SetSlider { .. } => "set-slider",
            Command::Toggle { .. } => "toggle",
            Command::Select { .. } => "select",
            Command::SelectNext => "select-next",
            Command::SelectPrev => "select-prev",
            Command::Type { .. } => "type",
            Command::Erase => "erase",
            Command::Submit => "submit",
            Command::AutoAdvance => "auto-advance",
            Command::Reset => "reset",
            Command::Drop { .. } => "drop",
            Command::Action { name } => name,
        }
    }
}
