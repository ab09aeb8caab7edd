//! Host configuration for the terminal runner.
//!
//! Loaded from `$HOME/.config/microsim/host.json`. A missing file means
//! defaults; an invalid one logs a warning and also falls back to defaults.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::input::Key;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(default)]
    pub key_bindings: HostKeyBindings,
    /// Target frames per second for the poll loop.
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Largest frame delta, in seconds, handed to the engine.
    #[serde(default = "default_max_step")]
    pub max_step: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostKeyBindings {
    #[serde(default = "default_quit")]
    pub quit: Vec<String>,
    #[serde(default = "default_fullscreen")]
    pub fullscreen: String,
}

fn default_fps() -> u32 { 30 }
fn default_max_step() -> f64 { crate::scene::DEFAULT_MAX_STEP }
fn default_quit() -> Vec<String> { vec!["q".into(), "Ctrl-c".into()] }
fn default_fullscreen() -> String { "F11".into() }

impl Default for HostKeyBindings {
    fn default() -> Self {
        HostKeyBindings {
            quit: default_quit(),
            fullscreen: default_fullscreen(),
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            key_bindings: HostKeyBindings::default(),
            fps: default_fps(),
            max_step: default_max_step(),
            log_file: None,
        }
    }
}

impl HostConfig {
    pub fn load() -> Self {
        let path = Self::config_path();
        match std::fs::read_to_string(&path) {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "invalid host config, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("microsim");
        path.push("host.json");
        path
    }

    pub fn is_quit(&self, event: &KeyEvent) -> bool {
        self.key_bindings.quit.iter().any(|b| matches_binding(b, event))
    }

    pub fn is_fullscreen(&self, event: &KeyEvent) -> bool {
        matches_binding(&self.key_bindings.fullscreen, event)
    }
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    if let Some(rest) = binding.strip_prefix("Alt-") {
        return event.modifiers.contains(KeyModifiers::ALT) && code_matches(rest, event.code);
    }
    if let Some(rest) = binding.strip_prefix("Ctrl-") {
        return event.modifiers.contains(KeyModifiers::CONTROL) && code_matches(rest, event.code);
    }

    // Plain bindings never fire while Ctrl or Alt is held, so "c" is not Ctrl-c.
    if event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return false;
    }
    code_matches(binding, event.code)
}

fn code_matches(binding: &str, code: KeyCode) -> bool {
    if let Some(n) = binding.strip_prefix('F').and_then(|rest| rest.parse::<u8>().ok()) {
        return code == KeyCode::F(n);
    }
    match Key::parse(binding) {
        Some(key) => to_key_code(key) == code,
        None => false,
    }
}

fn to_key_code(key: Key) -> KeyCode {
    match key {
        Key::Char(c) => KeyCode::Char(c),
        Key::Enter => KeyCode::Enter,
        Key::Backspace => KeyCode::Backspace,
        Key::Escape => KeyCode::Esc,
        Key::Tab => KeyCode::Tab,
        Key::Left => KeyCode::Left,
        Key::Right => KeyCode::Right,
        Key::Up => KeyCode::Up,
        Key::Down => KeyCode::Down,
        Key::Home => KeyCode::Home,
        Key::End => KeyCode::End,
    }
}

/// Translate a terminal key event into an engine key. Events with Ctrl or Alt
/// held, and keys the engine has no name for, yield `None`.
pub fn to_key(event: &KeyEvent) -> Option<Key> {
    if event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
