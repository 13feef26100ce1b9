//! Modal dialog controller.
//!
//! Markup contract:
//!
//! - a root with `role="dialog"`, `aria-modal="true"` and a hidden state
//!   (`aria-hidden="true"` plus `hidden`)
//! - one or more triggers anywhere on the page whose `aria-controls` names
//!   the dialog id; triggers are looked up on every click, so ones mounted
//!   after attach work too
//! - dismiss controls inside the dialog carrying `data-dismiss`
//!
//! While open, Tab on the last focusable member wraps to the first and
//! Shift+Tab on the first wraps to the last. The dismiss key closes the
//! dialog, and focus returns to whatever held it before opening.

use crate::accessibility::AnnouncementPriority;
use crate::aria;
use crate::config::InitialFocus;
use crate::dom::{Document, ElementId};
use crate::error::{WidgetError, WidgetResult};
use crate::event::{EventKind, ListenerScope, UiEvent, WidgetContext};
use crate::page::{Controller, Handle, Page};
use a11y_keybinds::WidgetAction;
use std::any::Any;

/// Controller for one dialog root.
#[derive(Debug)]
pub struct Modal {
    root: ElementId,
    /// Element focused just before opening. Weak: the element may be gone
    /// by the time the dialog closes.
    last_focused: Option<ElementId>,
}

impl Modal {
    /// Bind to a dialog root, normalizing its hidden markers.
    pub fn new(doc: &mut Document, root: ElementId) -> WidgetResult<Self> {
        if !doc.contains(root) {
            return Err(WidgetError::UnknownElement(root));
        }
        match doc.attr(root, aria::ROLE) {
            Some(aria::ROLE_DIALOG) | Some(aria::ROLE_ALERT_DIALOG) => {}
            _ => {
                return Err(WidgetError::MissingMarker {
                    controller: "modal",
                    root,
                    marker: "role=\"dialog\"",
                })
            }
        }

        // aria-hidden wins; fall back to the plain hidden flag.
        let open = match doc.bool_attr(root, aria::ARIA_HIDDEN) {
            Some(hidden) => !hidden,
            None => !doc.has_attr(root, crate::dom::HIDDEN),
        };
        doc.set_bool_attr(root, aria::ARIA_HIDDEN, !open);
        doc.set_hidden(root, !open);
        if !doc.has_attr(root, aria::MODAL) {
            doc.set_bool_attr(root, aria::MODAL, true);
        }

        Ok(Self {
            root,
            last_focused: None,
        })
    }

    /// Create and attach to a page.
    pub fn attach(page: &mut Page, root: ElementId) -> WidgetResult<Handle<Self>> {
        let modal = Self::new(page.document_mut(), root)?;
        Ok(page.attach(modal))
    }

    /// Controls that open the dialog, in document order.
    pub fn triggers(&self, doc: &Document) -> Vec<ElementId> {
        match doc.attr(self.root, aria::ID) {
            Some(dialog_id) => doc.query(doc.body(), |el| el.attr(aria::CONTROLS) == Some(dialog_id)),
            None => Vec::new(),
        }
    }

    /// Whether the dialog is showing, read from its marker.
    pub fn is_open(&self, doc: &Document) -> bool {
        doc.bool_attr(self.root, aria::ARIA_HIDDEN) == Some(false)
    }

    /// Show the dialog and move focus into it. No-op when already open.
    pub fn open(&mut self, cx: &mut WidgetContext<'_>) {
        if self.is_open(cx.doc) || !cx.doc.contains(self.root) {
            return;
        }

        let active = cx.doc.active_element();
        self.last_focused = (active != cx.doc.body()).then_some(active);

        cx.doc.set_bool_attr(self.root, aria::ARIA_HIDDEN, false);
        cx.doc.set_hidden(self.root, false);

        let focused_dialog = cx.config().modal.initial_focus == InitialFocus::Dialog
            && cx.doc.focus(self.root);
        if !focused_dialog {
            if let Some(first) = cx.doc.focusable_within(self.root).first().copied() {
                cx.doc.focus(first);
            }
        }

        tracing::debug!(controller = "modal", root = %self.root, "dialog opened");
        let message = match cx.doc.accessible_name(self.root) {
            Some(name) => format!("{name} dialog opened"),
            None => "Dialog opened".to_string(),
        };
        cx.announce(message, AnnouncementPriority::High);
    }

    /// Hide the dialog and restore focus. No-op when already closed.
    pub fn close(&mut self, cx: &mut WidgetContext<'_>) {
        if !self.is_open(cx.doc) {
            return;
        }

        cx.doc.set_bool_attr(self.root, aria::ARIA_HIDDEN, true);
        cx.doc.set_hidden(self.root, true);

        let previous = self.last_focused.take();
        let focus_inside = cx
            .doc
            .focused()
            .is_some_and(|f| cx.doc.contains_node(self.root, f));
        if cx.config().modal.restore_focus {
            match previous {
                Some(el) if cx.doc.focus(el) => {}
                _ => cx.doc.blur(),
            }
        } else if focus_inside {
            cx.doc.blur();
        }

        tracing::debug!(
            controller = "modal",
            root = %self.root,
            restored = ?cx.doc.focused(),
            "dialog closed"
        );
        cx.announce("Dialog closed", AnnouncementPriority::Normal);
    }

    /// Wrap focus at the edges of the Focusable Element Set. Returns
    /// whether focus was redirected.
    fn trap(&self, cx: &mut WidgetContext<'_>, backward: bool) -> bool {
        let members = cx.doc.focusable_within(self.root);
        let (Some(&first), Some(&last)) = (members.first(), members.last()) else {
            return false;
        };

        let active = cx.doc.active_element();
        let target = if backward && (active == first || active == self.root) {
            last
        } else if !backward && (active == last || active == self.root) {
            first
        } else {
            return false;
        };
        cx.doc.focus(target);
        true
    }

    fn is_dismiss_control(&self, doc: &Document, target: ElementId) -> bool {
        doc.query(self.root, |el| el.attr(aria::DATA_DISMISS).is_some())
            .into_iter()
            .any(|control| doc.contains_node(control, target))
    }
}

impl Controller for Modal {
    fn kind(&self) -> &'static str {
        "modal"
    }

    fn root(&self) -> ElementId {
        self.root
    }

    fn subscriptions(&self) -> Vec<(ListenerScope, EventKind)> {
        vec![
            (ListenerScope::Document, EventKind::Click),
            (ListenerScope::Document, EventKind::KeyDown),
        ]
    }

    fn handle(&mut self, event: &UiEvent, cx: &mut WidgetContext<'_>) {
        match event {
            UiEvent::Click { target } => {
                if self.is_open(cx.doc) {
                    if self.is_dismiss_control(cx.doc, *target) {
                        self.close(cx);
                    }
                } else if self
                    .triggers(cx.doc)
                    .into_iter()
                    .any(|t| cx.doc.contains_node(t, *target))
                {
                    self.open(cx);
                }
            }
            UiEvent::Key { .. } => {
                if !self.is_open(cx.doc) {
                    return;
                }
                if cx.is_action(WidgetAction::Dismiss, event) {
                    // One layer per key press: outer dialogs stay open.
                    self.close(cx);
                    cx.prevent_default();
                    cx.stop_propagation();
                } else if cx.is_action(WidgetAction::FocusPrev, event) {
                    if self.trap(cx, true) {
                        cx.prevent_default();
                    }
                } else if cx.is_action(WidgetAction::FocusNext, event) && self.trap(cx, false) {
                    cx.prevent_default();
                }
            }
        }
    }

    fn dispose(&mut self, _cx: &mut WidgetContext<'_>) {
        self.last_focused = None;
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
