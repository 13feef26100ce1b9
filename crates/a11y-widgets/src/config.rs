//! Widget configuration.
//!
//! Loaded from `config.toml` in the platform config directory. Every
//! section is optional; missing values fall back to the ARIA authoring
//! practices defaults.
//!
//! ```toml
//! [keys]
//! dismiss = ["Esc", "ctrl+w"]
//!
//! [modal]
//! initial_focus = "dialog"
//!
//! [accessibility]
//! status_announcements = false
//! ```

use crate::accessibility::AccessibilityConfig;
use crate::error::ConfigError;
use a11y_keybinds::{Keymap, WidgetAction};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level widget configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Key bindings.
    #[serde(default)]
    pub keys: KeysConfig,
    /// Modal dialog behaviour.
    #[serde(default)]
    pub modal: ModalConfig,
    /// Dropdown menu behaviour.
    #[serde(default)]
    pub dropdown: DropdownConfig,
    /// Announcements.
    #[serde(default)]
    pub accessibility: AccessibilityConfig,
}

impl WidgetConfig {
    /// Load configuration from the default path, falling back to defaults
    /// when the file is missing or invalid.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), error = %err, "ignoring invalid widget config");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded widget config");
        Ok(config)
    }

    /// Parse configuration from TOML text. Key notations are validated.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.keys.keymap()?;
        Ok(config)
    }

    /// Get configuration file path.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "a11y-widgets")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Compile the `[keys]` section.
    pub fn keymap(&self) -> Result<Keymap, ConfigError> {
        self.keys.keymap()
    }
}

/// Key notations for each widget action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeysConfig {
    /// Close the open dialog or menu.
    #[serde(default = "default_dismiss")]
    pub dismiss: Vec<String>,
    /// Sequential focus forward.
    #[serde(default = "default_focus_next")]
    pub focus_next: Vec<String>,
    /// Sequential focus backward.
    #[serde(default = "default_focus_prev")]
    pub focus_prev: Vec<String>,
    /// Activate the focused control.
    #[serde(default = "default_activate")]
    pub activate: Vec<String>,
    /// Previous tab.
    #[serde(default = "default_prev_tab")]
    pub prev_tab: Vec<String>,
    /// Next tab.
    #[serde(default = "default_next_tab")]
    pub next_tab: Vec<String>,
    /// First tab.
    #[serde(default = "default_first_tab")]
    pub first_tab: Vec<String>,
    /// Last tab.
    #[serde(default = "default_last_tab")]
    pub last_tab: Vec<String>,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            dismiss: default_dismiss(),
            focus_next: default_focus_next(),
            focus_prev: default_focus_prev(),
            activate: default_activate(),
            prev_tab: default_prev_tab(),
            next_tab: default_next_tab(),
            first_tab: default_first_tab(),
            last_tab: default_last_tab(),
        }
    }
}

fn keys(notations: &[&str]) -> Vec<String> {
    notations.iter().map(|s| s.to_string()).collect()
}

fn default_dismiss() -> Vec<String> {
    keys(&["Esc"])
}

fn default_focus_next() -> Vec<String> {
    keys(&["Tab"])
}

fn default_focus_prev() -> Vec<String> {
    keys(&["Shift+Tab"])
}

fn default_activate() -> Vec<String> {
    keys(&["Enter", "Space"])
}

fn default_prev_tab() -> Vec<String> {
    keys(&["Left"])
}

fn default_next_tab() -> Vec<String> {
    keys(&["Right"])
}

fn default_first_tab() -> Vec<String> {
    keys(&["Home"])
}

fn default_last_tab() -> Vec<String> {
    keys(&["End"])
}

impl KeysConfig {
    fn notations(&self, action: WidgetAction) -> &[String] {
        match action {
            WidgetAction::Dismiss => &self.dismiss,
            WidgetAction::FocusNext => &self.focus_next,
            WidgetAction::FocusPrev => &self.focus_prev,
            WidgetAction::Activate => &self.activate,
            WidgetAction::PrevTab => &self.prev_tab,
            WidgetAction::NextTab => &self.next_tab,
            WidgetAction::FirstTab => &self.first_tab,
            WidgetAction::LastTab => &self.last_tab,
        }
    }

    /// Build a keymap, rejecting any notation that does not parse.
    pub fn keymap(&self) -> Result<Keymap, ConfigError> {
        let mut keymap = Keymap::empty();
        for action in WidgetAction::ALL {
            for notation in self.notations(action) {
                keymap
                    .bind_notation(notation, action)
                    .map_err(|source| ConfigError::Key {
                        action: action.label(),
                        notation: notation.clone(),
                        source,
                    })?;
            }
        }
        Ok(keymap)
    }
}

/// Modal dialog settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalConfig {
    /// Return focus to the opener on close.
    #[serde(default = "default_true")]
    pub restore_focus: bool,
    /// Where focus lands when the dialog opens.
    #[serde(default)]
    pub initial_focus: InitialFocus,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            restore_focus: true,
            initial_focus: InitialFocus::default(),
        }
    }
}

/// Initial focus target for an opened dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InitialFocus {
    /// First member of the Focusable Element Set
    #[default]
    First,
    /// The dialog container itself (needs `tabindex="-1"`), falling back
    /// to the first member
    Dialog,
}

/// Dropdown menu settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownConfig {
    /// Close when a pointer press lands outside the menu and trigger.
    #[serde(default = "default_true")]
    pub close_on_outside_click: bool,
    /// Close and refocus the trigger on the dismiss key.
    #[serde(default = "default_true")]
    pub close_on_dismiss: bool,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            close_on_outside_click: true,
            close_on_dismiss: true,
        }
    }
}

fn default_true() -> bool {
    true
}
