//! Error types for widget integration.
//!
//! Event handling itself never fails. These errors only surface while a
//! host is wiring controllers to markup or loading configuration.

use crate::dom::ElementId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building markup or attaching controllers.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Handle does not resolve to a connected element
    #[error("unknown element {0}")]
    UnknownElement(ElementId),

    /// Appending would make an element its own ancestor
    #[error("cannot append {child} under {parent}: would create a cycle")]
    HierarchyCycle { parent: ElementId, child: ElementId },

    /// Widget root is missing a required marker
    #[error("{controller} root {root} is missing {marker}")]
    MissingMarker {
        controller: &'static str,
        root: ElementId,
        marker: &'static str,
    },

    /// Widget root holds none of the controls the controller drives
    #[error("{controller} root {root} has no {what}")]
    EmptyWidget {
        controller: &'static str,
        root: ElementId,
        what: &'static str,
    },

    /// Controller id is not attached to the page
    #[error("no controller attached with id {0}")]
    UnknownController(usize),
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`WidgetConfig`](crate::WidgetConfig)
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A key notation in the `[keys]` section could not be parsed
    #[error("invalid key '{notation}' for {action}: {source}")]
    Key {
        action: &'static str,
        notation: String,
        #[source]
        source: a11y_keybinds::ParseError,
    },
}

/// Result type for widget wiring.
pub type WidgetResult<T> = Result<T, WidgetError>;
