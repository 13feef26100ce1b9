//! Events delivered to controllers and the context they run in.

use crate::accessibility::{AnnouncementBuffer, AnnouncementPriority};
use crate::config::WidgetConfig;
use crate::dom::{Document, ElementId};
use a11y_keybinds::{Keymap, WidgetAction};
use crossterm::event::KeyEvent;

/// Kinds of events a controller can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer press, or keyboard activation of a native control
    Click,
    /// Key press delivered to the focused element
    KeyDown,
}

/// Where a subscription listens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerScope {
    /// Fires when the event target is this element or inside it
    Element(ElementId),
    /// Fires for every event in the document
    Document,
}

/// A discrete input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Pointer press on an element
    Click { target: ElementId },
    /// Key press; the target is the active element
    Key { target: ElementId, key: KeyEvent },
}

impl UiEvent {
    /// Event kind.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click { .. } => EventKind::Click,
            Self::Key { .. } => EventKind::KeyDown,
        }
    }

    /// Element the event was dispatched at.
    pub fn target(&self) -> ElementId {
        match self {
            Self::Click { target } | Self::Key { target, .. } => *target,
        }
    }

    /// Key event, for key presses.
    pub fn key(&self) -> Option<&KeyEvent> {
        match self {
            Self::Key { key, .. } => Some(key),
            Self::Click { .. } => None,
        }
    }
}

/// Everything a controller may touch while handling an event or running
/// an operation.
///
/// The document is borrowed mutably for the duration of one synchronous
/// handler, so no two handlers can ever interleave.
pub struct WidgetContext<'a> {
    /// The document being driven
    pub doc: &'a mut Document,
    keymap: &'a Keymap,
    config: &'a WidgetConfig,
    announcements: &'a mut AnnouncementBuffer,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl<'a> WidgetContext<'a> {
    pub(crate) fn new(
        doc: &'a mut Document,
        keymap: &'a Keymap,
        config: &'a WidgetConfig,
        announcements: &'a mut AnnouncementBuffer,
    ) -> Self {
        Self {
            doc,
            keymap,
            config,
            announcements,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &WidgetConfig {
        self.config
    }

    /// Active keymap.
    pub fn keymap(&self) -> &Keymap {
        self.keymap
    }

    /// Whether the event is a key press bound to `action`.
    pub fn is_action(&self, action: WidgetAction, event: &UiEvent) -> bool {
        event.key().is_some_and(|key| self.keymap.is(action, key))
    }

    /// Suppress the page's default action (focus advance, activation).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a handler suppressed the default action.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Skip every controller after this one for the current event.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub(crate) fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Queue a status announcement, if announcements are enabled.
    pub fn announce(&mut self, message: impl Into<String>, priority: AnnouncementPriority) {
        if self.config.accessibility.status_announcements {
            self.announcements.announce(message, priority);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_event_accessors() {
        let doc = Document::new();
        let body = doc.body();

        let click = UiEvent::Click { target: body };
        assert_eq!(click.kind(), EventKind::Click);
        assert_eq!(click.target(), body);
        assert!(click.key().is_none());

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let key = UiEvent::Key { target: body, key: esc };
        assert_eq!(key.kind(), EventKind::KeyDown);
        assert_eq!(key.key(), Some(&esc));
    }

    #[test]
    fn test_context_flags_and_announcements() {
        let mut doc = Document::new();
        let keymap = Keymap::default();
        let config = WidgetConfig::default();
        let mut buffer = AnnouncementBuffer::new();
        let body = doc.body();

        let mut cx = WidgetContext::new(&mut doc, &keymap, &config, &mut buffer);
        let esc = UiEvent::Key {
            target: body,
            key: KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
        };
        assert!(cx.is_action(WidgetAction::Dismiss, &esc));
        assert!(!cx.is_action(WidgetAction::Dismiss, &UiEvent::Click { target: body }));

        assert!(!cx.is_default_prevented());
        cx.prevent_default();
        cx.stop_propagation();
        assert!(cx.is_default_prevented());
        assert!(cx.is_propagation_stopped());

        cx.announce("hello", AnnouncementPriority::Normal);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_silent_config_drops_announcements() {
        let mut doc = Document::new();
        let keymap = Keymap::default();
        let mut config = WidgetConfig::default();
        config.accessibility.status_announcements = false;
        let mut buffer = AnnouncementBuffer::new();

        let mut cx = WidgetContext::new(&mut doc, &keymap, &config, &mut buffer);
        cx.announce("hello", AnnouncementPriority::High);
        assert!(buffer.is_empty());
    }
}
