//! Reading key notations from config files.
//!
//! A notation is an optional run of modifiers followed by one key. Both
//! `+` and `-` separate parts, and the whole thing may be wrapped in angle
//! brackets, so `"shift+tab"`, `"S-Tab"` and `"<S-Tab>"` all name the key
//! that moves focus backwards. Names are case-insensitive.

use crate::binding::KeyBinding;
use crossterm::event::{KeyCode, KeyModifiers};
use thiserror::Error;

/// Why a notation could not be turned into a [`KeyBinding`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing left after trimming, or a trailing separator with no key.
    #[error("empty key notation")]
    Empty,
    #[error("unknown modifier: {0}")]
    UnknownModifier(String),
    #[error("unknown key: {0}")]
    UnknownKey(String),
}

const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("esc", KeyCode::Esc),
    ("escape", KeyCode::Esc),
    ("enter", KeyCode::Enter),
    ("return", KeyCode::Enter),
    ("cr", KeyCode::Enter),
    ("space", KeyCode::Char(' ')),
    ("tab", KeyCode::Tab),
    ("backtab", KeyCode::BackTab),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("pageup", KeyCode::PageUp),
    ("pgup", KeyCode::PageUp),
    ("pagedown", KeyCode::PageDown),
    ("pgdown", KeyCode::PageDown),
    ("pgdn", KeyCode::PageDown),
];

/// Parse a notation such as `"esc"`, `"shift+tab"`, `"<C-w>"` or `"f2"`.
///
/// A single character binds that character, lowercased. `backtab` is
/// accepted and ends up equal to Shift+Tab.
pub fn parse_key(notation: &str) -> Result<KeyBinding, ParseError> {
    let trimmed = notation.trim();
    let inner = trimmed
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(trimmed);
    if inner.is_empty() {
        return Err(ParseError::Empty);
    }

    let (modifier_names, key) = split_notation(inner);
    let modifiers = modifier_names
        .into_iter()
        .try_fold(KeyModifiers::NONE, |acc, name| modifier(name).map(|m| acc | m))?;

    Ok(KeyBinding::new(key_code(key)?, modifiers))
}

/// Split into modifier names and the final key name.
fn split_notation(s: &str) -> (Vec<&str>, &str) {
    // A lone "+" or "-" is that key.
    let separator = if s.contains('+') {
        '+'
    } else if s.len() > 2 && s.contains('-') {
        '-'
    } else {
        return (Vec::new(), s);
    };

    // A doubled trailing separator ("ctrl++", "C--") binds the separator.
    let (mods, key) = match s.strip_suffix(separator) {
        Some("") => return (Vec::new(), s),
        Some(rest) if rest.ends_with(separator) => (&rest[..rest.len() - 1], &s[s.len() - 1..]),
        _ => match s.rsplit_once(separator) {
            Some(split) => split,
            None => return (Vec::new(), s),
        },
    };
    (mods.split(separator).collect(), key)
}

fn modifier(name: &str) -> Result<KeyModifiers, ParseError> {
    match name.to_ascii_lowercase().as_str() {
        "c" | "ctrl" | "control" => Ok(KeyModifiers::CONTROL),
        "a" | "m" | "alt" | "meta" | "option" => Ok(KeyModifiers::ALT),
        "s" | "shift" => Ok(KeyModifiers::SHIFT),
        other => Err(ParseError::UnknownModifier(other.to_string())),
    }
}

fn key_code(name: &str) -> Result<KeyCode, ParseError> {
    let lower = name.to_lowercase();
    let mut chars = lower.chars();
    match (chars.next(), chars.next()) {
        (None, _) => return Err(ParseError::Empty),
        (Some(c), None) => return Ok(KeyCode::Char(c)),
        _ => {}
    }

    if let Some(&(_, code)) = NAMED_KEYS.iter().find(|(n, _)| *n == lower) {
        return Ok(code);
    }

    let function = lower
        .strip_prefix('f')
        .and_then(|digits| digits.parse::<u8>().ok())
        .filter(|n| (1..=12).contains(n));
    function.map(KeyCode::F).ok_or(ParseError::UnknownKey(lower))
}
