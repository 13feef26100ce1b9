//! # a11y-keybinds
//!
//! Key handling shared by the a11y suite widgets.
//!
//! ## Features
//!
//! - Key notation parsing (`"shift+tab"`, `"<S-Tab>"`, `"esc"`)
//! - Shift+Tab / BackTab normalization
//! - A [`Keymap`] from keys to [`WidgetAction`]s, configurable per host

mod binding;
mod keymap;
mod parser;

pub use binding::KeyBinding;
pub use keymap::{Keymap, WidgetAction};
pub use parser::{parse_key, ParseError};

use crossterm::event::KeyCode;

/// Helper to create a key binding with no modifiers.
pub fn key(code: KeyCode) -> KeyBinding {
    KeyBinding::key(code)
}

/// Helper to create a Shift+key binding.
pub fn shift(code: KeyCode) -> KeyBinding {
    KeyBinding::shift(code)
}
