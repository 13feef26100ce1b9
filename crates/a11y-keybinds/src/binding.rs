//! One key plus its modifiers, compared the way terminals report them.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A key chord a widget action can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: KeyCode,
    #[serde(default = "default_modifiers")]
    pub modifiers: KeyModifiers,
}

fn default_modifiers() -> KeyModifiers {
    KeyModifiers::NONE
}

/// Terminals report Shift+Tab as `BackTab`, with or without the shift bit.
/// Fold both spellings into `Tab` + `SHIFT` so bindings compare equal.
fn normalize(key: KeyCode, modifiers: KeyModifiers) -> (KeyCode, KeyModifiers) {
    match key {
        KeyCode::BackTab => (KeyCode::Tab, modifiers | KeyModifiers::SHIFT),
        other => (other, modifiers),
    }
}

impl KeyBinding {
    /// `BackTab` is stored as `Tab` with `SHIFT`.
    pub fn new(key: KeyCode, modifiers: KeyModifiers) -> Self {
        let (key, modifiers) = normalize(key, modifiers);
        Self { key, modifiers }
    }

    /// Unmodified key.
    pub fn key(key: KeyCode) -> Self {
        Self::new(key, KeyModifiers::NONE)
    }

    /// Create a Shift+key binding.
    pub fn shift(key: KeyCode) -> Self {
        Self::new(key, KeyModifiers::SHIFT)
    }

    /// Whether a key event from the terminal is this chord.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let (key, modifiers) = normalize(event.code, event.modifiers);
        self.key == key && self.modifiers == modifiers
    }
}

impl From<KeyEvent> for KeyBinding {
    fn from(event: KeyEvent) -> Self {
        Self::new(event.code, event.modifiers)
    }
}

impl fmt::Display for KeyBinding {
    /// Human-readable form for help text, e.g. `Shift+Tab` or `Ctrl+W`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABELS: [(KeyModifiers, &str); 3] = [
            (KeyModifiers::CONTROL, "Ctrl"),
            (KeyModifiers::ALT, "Alt"),
            (KeyModifiers::SHIFT, "Shift"),
        ];
        for (flag, label) in LABELS {
            if self.modifiers.contains(flag) {
                write!(f, "{label}+")?;
            }
        }
        match self.key {
            KeyCode::Char(' ') => f.write_str("Space"),
            KeyCode::Char(c) => write!(f, "{}", c.to_uppercase()),
            KeyCode::Esc => f.write_str("Escape"),
            KeyCode::F(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}
