//! Widget actions and the keymap that binds keys to them.

use crate::binding::KeyBinding;
use crate::parser::{parse_key, ParseError};
use crossterm::event::{KeyCode, KeyEvent};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An interaction every widget controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetAction {
    /// Close the open dialog or popup
    Dismiss,
    /// Sequential focus navigation forward
    FocusNext,
    /// Sequential focus navigation backward
    FocusPrev,
    /// Activate the focused control (same as a click)
    Activate,
    /// Select the previous tab in a tab list
    PrevTab,
    /// Select the next tab in a tab list
    NextTab,
    /// Select the first tab in a tab list
    FirstTab,
    /// Select the last tab in a tab list
    LastTab,
}

impl WidgetAction {
    /// All actions, in help-screen order.
    pub const ALL: [WidgetAction; 8] = [
        Self::Dismiss,
        Self::FocusNext,
        Self::FocusPrev,
        Self::Activate,
        Self::PrevTab,
        Self::NextTab,
        Self::FirstTab,
        Self::LastTab,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dismiss => "Dismiss",
            Self::FocusNext => "Next control",
            Self::FocusPrev => "Previous control",
            Self::Activate => "Activate",
            Self::PrevTab => "Previous tab",
            Self::NextTab => "Next tab",
            Self::FirstTab => "First tab",
            Self::LastTab => "Last tab",
        }
    }
}

impl fmt::Display for WidgetAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bindings from keys to widget actions.
///
/// A key may trigger more than one action; controllers decide which ones
/// apply given where focus is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: Vec<(KeyBinding, WidgetAction)>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut keymap = Self::empty();
        keymap.bind(KeyBinding::key(KeyCode::Esc), WidgetAction::Dismiss);
        keymap.bind(KeyBinding::key(KeyCode::Tab), WidgetAction::FocusNext);
        keymap.bind(KeyBinding::shift(KeyCode::Tab), WidgetAction::FocusPrev);
        keymap.bind(KeyBinding::key(KeyCode::Enter), WidgetAction::Activate);
        keymap.bind(KeyBinding::key(KeyCode::Char(' ')), WidgetAction::Activate);
        keymap.bind(KeyBinding::key(KeyCode::Left), WidgetAction::PrevTab);
        keymap.bind(KeyBinding::key(KeyCode::Right), WidgetAction::NextTab);
        keymap.bind(KeyBinding::key(KeyCode::Home), WidgetAction::FirstTab);
        keymap.bind(KeyBinding::key(KeyCode::End), WidgetAction::LastTab);
        keymap
    }
}

impl Keymap {
    /// Create a keymap with no bindings at all.
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Add a binding. Duplicate pairs are ignored.
    pub fn bind(&mut self, key: KeyBinding, action: WidgetAction) {
        if !self.bindings.contains(&(key, action)) {
            self.bindings.push((key, action));
        }
    }

    /// Bind a key given in notation form, e.g. `"shift+tab"`.
    pub fn bind_notation(&mut self, notation: &str, action: WidgetAction) -> Result<(), ParseError> {
        let key = parse_key(notation)?;
        self.bind(key, action);
        Ok(())
    }

    /// Remove every binding for an action.
    pub fn unbind_action(&mut self, action: WidgetAction) {
        self.bindings.retain(|(_, a)| *a != action);
    }

    /// Check whether a key event triggers the given action.
    pub fn is(&self, action: WidgetAction, event: &KeyEvent) -> bool {
        self.bindings
            .iter()
            .any(|(key, a)| *a == action && key.matches(event))
    }

    /// All actions triggered by a key event.
    pub fn actions_for<'a>(&'a self, event: &'a KeyEvent) -> impl Iterator<Item = WidgetAction> + 'a {
        self.bindings
            .iter()
            .filter(move |(key, _)| key.matches(event))
            .map(|(_, action)| *action)
    }

    /// Keys bound to an action.
    pub fn keys_for(&self, action: WidgetAction) -> Vec<KeyBinding> {
        self.bindings
            .iter()
            .filter(|(_, a)| *a == action)
            .map(|(key, _)| *key)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_default_bindings() {
        let keymap = Keymap::default();

        assert!(keymap.is(WidgetAction::Dismiss, &press(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(keymap.is(WidgetAction::FocusNext, &press(KeyCode::Tab, KeyModifiers::NONE)));
        assert!(keymap.is(WidgetAction::FocusPrev, &press(KeyCode::BackTab, KeyModifiers::SHIFT)));
        assert!(!keymap.is(WidgetAction::FocusNext, &press(KeyCode::BackTab, KeyModifiers::SHIFT)));
        assert!(keymap.is(WidgetAction::Activate, &press(KeyCode::Char(' '), KeyModifiers::NONE)));
    }

    #[test]
    fn test_rebind_dismiss() {
        let mut keymap = Keymap::default();
        keymap.unbind_action(WidgetAction::Dismiss);
        keymap.bind_notation("ctrl+w", WidgetAction::Dismiss).unwrap();

        assert!(!keymap.is(WidgetAction::Dismiss, &press(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(keymap.is(WidgetAction::Dismiss, &press(KeyCode::Char('w'), KeyModifiers::CONTROL)));
        assert_eq!(keymap.keys_for(WidgetAction::Dismiss).len(), 1);
    }

    #[test]
    fn test_actions_for_key() {
        let mut keymap = Keymap::default();
        keymap.bind(KeyBinding::key(KeyCode::Esc), WidgetAction::FirstTab);

        let esc = press(KeyCode::Esc, KeyModifiers::NONE);
        let actions: Vec<_> = keymap.actions_for(&esc).collect();
        assert_eq!(actions, vec![WidgetAction::Dismiss, WidgetAction::FirstTab]);
    }

    #[test]
    fn test_bad_notation_rejected() {
        let mut keymap = Keymap::empty();
        assert!(keymap.bind_notation("hyper+q", WidgetAction::Dismiss).is_err());
        assert!(keymap.keys_for(WidgetAction::Dismiss).is_empty());
    }
}
