//! Accordion controller.
//!
//! Each toggle is a button carrying `aria-expanded` and an `aria-controls`
//! reference to its panel. Toggles are independent: any number of panels
//! may be open at once.

use crate::accessibility::AnnouncementPriority;
use crate::aria;
use crate::dom::{Document, ElementId, ElementKind};
use crate::error::{WidgetError, WidgetResult};
use crate::event::{EventKind, ListenerScope, UiEvent, WidgetContext};
use crate::page::{Controller, Handle, Page};
use std::any::Any;

/// Controller for one accordion container.
#[derive(Debug)]
pub struct Accordion {
    root: ElementId,
}

impl Accordion {
    /// Bind to an accordion root and bring each panel in line with its
    /// toggle's marker.
    pub fn new(doc: &mut Document, root: ElementId) -> WidgetResult<Self> {
        if !doc.contains(root) {
            return Err(WidgetError::UnknownElement(root));
        }
        let accordion = Self { root };
        let toggles = accordion.toggles(doc);
        if toggles.is_empty() {
            return Err(WidgetError::EmptyWidget {
                controller: "accordion",
                root,
                what: "toggles",
            });
        }
        for toggle in toggles {
            let expanded = accordion.is_expanded(doc, toggle);
            if let Some(panel) = panel_for(doc, toggle) {
                doc.set_bool_attr(toggle, aria::EXPANDED, expanded);
                doc.set_hidden(panel, !expanded);
            }
        }
        doc.set_attr(root, aria::DATA_ACCORDION, "");
        Ok(accordion)
    }

    /// Create and attach to a page.
    pub fn attach(page: &mut Page, root: ElementId) -> WidgetResult<Handle<Self>> {
        let accordion = Self::new(page.document_mut(), root)?;
        Ok(page.attach(accordion))
    }

    /// Toggle buttons in document order, excluding those of nested
    /// accordions.
    pub fn toggles(&self, doc: &Document) -> Vec<ElementId> {
        doc.query(self.root, |el| {
            el.kind == ElementKind::Button
                && el.attr(aria::EXPANDED).is_some()
                && el.attr(aria::CONTROLS).is_some()
        })
        .into_iter()
        .filter(|toggle| self.owns(doc, *toggle))
        .collect()
    }

    fn owns(&self, doc: &Document, toggle: ElementId) -> bool {
        let mut current = doc.get(toggle).and_then(|el| el.parent());
        while let Some(el) = current {
            if el == self.root {
                return true;
            }
            if doc.has_attr(el, aria::DATA_ACCORDION) {
                return false;
            }
            current = doc.get(el).and_then(|e| e.parent());
        }
        false
    }

    /// Whether the toggle's marker says expanded.
    pub fn is_expanded(&self, doc: &Document, toggle: ElementId) -> bool {
        doc.bool_attr(toggle, aria::EXPANDED).unwrap_or(false)
    }

    /// Flip one toggle. A toggle whose panel is missing is left untouched.
    pub fn toggle(&mut self, cx: &mut WidgetContext<'_>, toggle: ElementId) {
        let expanded = self.is_expanded(cx.doc, toggle);
        self.set_expanded(cx, toggle, !expanded);
    }

    /// Expand or collapse one toggle.
    pub fn set_expanded(&mut self, cx: &mut WidgetContext<'_>, toggle: ElementId, expanded: bool) {
        let Some(panel) = panel_for(cx.doc, toggle) else {
            tracing::debug!(controller = "accordion", toggle = %toggle, "panel missing, ignoring");
            return;
        };

        let was = self.is_expanded(cx.doc, toggle);
        cx.doc.set_bool_attr(toggle, aria::EXPANDED, expanded);
        cx.doc.set_hidden(panel, !expanded);
        if was == expanded {
            return;
        }

        tracing::debug!(controller = "accordion", toggle = %toggle, expanded, "toggled section");
        let name = cx.doc.accessible_name(toggle).unwrap_or("Section").to_string();
        let state = if expanded { "expanded" } else { "collapsed" };
        cx.announce(format!("{name} {state}"), AnnouncementPriority::Normal);
    }

    /// Expand every section.
    pub fn expand_all(&mut self, cx: &mut WidgetContext<'_>) {
        for toggle in self.toggles(cx.doc) {
            self.set_expanded(cx, toggle, true);
        }
    }

    /// Collapse every section.
    pub fn collapse_all(&mut self, cx: &mut WidgetContext<'_>) {
        for toggle in self.toggles(cx.doc) {
            self.set_expanded(cx, toggle, false);
        }
    }
}

fn panel_for(doc: &Document, toggle: ElementId) -> Option<ElementId> {
    doc.attr(toggle, aria::CONTROLS)
        .and_then(|panel_id| doc.element_by_id(panel_id))
}

impl Controller for Accordion {
    fn kind(&self) -> &'static str {
        "accordion"
    }

    fn root(&self) -> ElementId {
        self.root
    }

    fn subscriptions(&self) -> Vec<(ListenerScope, EventKind)> {
        vec![(ListenerScope::Element(self.root), EventKind::Click)]
    }

    fn handle(&mut self, event: &UiEvent, cx: &mut WidgetContext<'_>) {
        let UiEvent::Click { target } = event else {
            return;
        };
        let toggle = self
            .toggles(cx.doc)
            .into_iter()
            .find(|t| cx.doc.contains_node(*t, *target));
        if let Some(toggle) = toggle {
            self.toggle(cx, toggle);
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
