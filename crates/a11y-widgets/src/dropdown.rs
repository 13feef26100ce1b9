//! Dropdown menu controller.
//!
//! The trigger carries `aria-haspopup`, `aria-expanded` and an
//! `aria-controls` reference to the menu. The menu closes on a pointer
//! press outside both menu and trigger, and on the dismiss key (which also
//! returns focus to the trigger).

use crate::accessibility::AnnouncementPriority;
use crate::aria;
use crate::dom::{Document, ElementId};
use crate::error::{WidgetError, WidgetResult};
use crate::event::{EventKind, ListenerScope, UiEvent, WidgetContext};
use crate::page::{Controller, Handle, Page};
use a11y_keybinds::WidgetAction;
use std::any::Any;

/// Controller for one dropdown.
#[derive(Debug)]
pub struct Dropdown {
    root: ElementId,
    trigger: ElementId,
}

impl Dropdown {
    /// Bind to a dropdown root, syncing the menu to the trigger's marker.
    pub fn new(doc: &mut Document, root: ElementId) -> WidgetResult<Self> {
        if !doc.contains(root) {
            return Err(WidgetError::UnknownElement(root));
        }
        let trigger = doc
            .query(root, |el| {
                el.attr(aria::HAS_POPUP).is_some_and(|v| v != "false")
                    && el.attr(aria::CONTROLS).is_some()
            })
            .first()
            .copied()
            .ok_or(WidgetError::MissingMarker {
                controller: "dropdown",
                root,
                marker: "aria-haspopup trigger",
            })?;

        let dropdown = Self { root, trigger };
        let open = dropdown.is_open(doc);
        doc.set_bool_attr(trigger, aria::EXPANDED, open);
        if let Some(menu) = dropdown.menu(doc) {
            doc.set_hidden(menu, !open);
        }
        Ok(dropdown)
    }

    /// Create and attach to a page.
    pub fn attach(page: &mut Page, root: ElementId) -> WidgetResult<Handle<Self>> {
        let dropdown = Self::new(page.document_mut(), root)?;
        Ok(page.attach(dropdown))
    }

    /// The trigger control.
    pub fn trigger(&self) -> ElementId {
        self.trigger
    }

    /// The menu, looked up fresh from the trigger's reference.
    pub fn menu(&self, doc: &Document) -> Option<ElementId> {
        doc.attr(self.trigger, aria::CONTROLS)
            .and_then(|menu_id| doc.element_by_id(menu_id))
    }

    /// Whether the menu is open, read from the trigger's marker.
    pub fn is_open(&self, doc: &Document) -> bool {
        doc.bool_attr(self.trigger, aria::EXPANDED) == Some(true)
    }

    /// Flip the menu.
    pub fn toggle(&mut self, cx: &mut WidgetContext<'_>) {
        let open = self.is_open(cx.doc);
        self.set_open(cx, !open);
    }

    /// Close the menu if open. Focus is left where it is.
    pub fn close(&mut self, cx: &mut WidgetContext<'_>) {
        if self.is_open(cx.doc) {
            self.set_open(cx, false);
        }
    }

    fn set_open(&mut self, cx: &mut WidgetContext<'_>, open: bool) {
        let Some(menu) = self.menu(cx.doc) else {
            tracing::debug!(controller = "dropdown", trigger = %self.trigger, "menu missing, ignoring");
            return;
        };
        cx.doc.set_bool_attr(self.trigger, aria::EXPANDED, open);
        cx.doc.set_hidden(menu, !open);

        tracing::debug!(controller = "dropdown", root = %self.root, open, "menu toggled");
        cx.announce(
            if open { "Menu expanded" } else { "Menu collapsed" },
            AnnouncementPriority::Normal,
        );
    }
}

impl Controller for Dropdown {
    fn kind(&self) -> &'static str {
        "dropdown"
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
                if cx.doc.contains_node(self.trigger, *target) {
                    self.toggle(cx);
                    return;
                }
                if !self.is_open(cx.doc) || !cx.config().dropdown.close_on_outside_click {
                    return;
                }
                let inside_menu = self
                    .menu(cx.doc)
                    .is_some_and(|menu| cx.doc.contains_node(menu, *target));
                if !inside_menu {
                    tracing::debug!(controller = "dropdown", target = %target, "outside click");
                    self.close(cx);
                }
            }
            UiEvent::Key { .. } => {
                if self.is_open(cx.doc)
                    && cx.config().dropdown.close_on_dismiss
                    && cx.is_action(WidgetAction::Dismiss, event)
                {
                    self.close(cx);
                    cx.doc.focus(self.trigger);
                    cx.prevent_default();
                    cx.stop_propagation();
                }
            }
        }
    }

    fn dispose(&mut self, cx: &mut WidgetContext<'_>) {
        tracing::debug!(controller = "dropdown", root = %self.root, open = self.is_open(cx.doc), "disposing");
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
