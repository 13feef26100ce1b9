//! Tabs controller.
//!
//! A `role="tablist"` inside the root holds `role="tab"` controls. Each tab
//! names its panel through `aria-controls`. Exactly one tab is selected
//! and exactly one panel shown at any time after attach.
//!
//! Focus follows the roving `tabindex` pattern: the selected tab is the
//! only one in the Tab sequence, and arrow keys / Home / End move the
//! selection within the list.

use crate::accessibility::AnnouncementPriority;
use crate::aria;
use crate::dom::{Document, ElementId};
use crate::error::{WidgetError, WidgetResult};
use crate::event::{EventKind, ListenerScope, UiEvent, WidgetContext};
use crate::page::{Controller, Handle, Page};
use a11y_keybinds::WidgetAction;
use std::any::Any;

/// Controller for one tab group.
#[derive(Debug)]
pub struct Tabs {
    root: ElementId,
    tablist: ElementId,
}

impl Tabs {
    /// Bind to a tabs root and enforce the single-selection invariant.
    ///
    /// When the markup does not mark exactly one tab selected, the first
    /// marked tab (or else the first tab) becomes the selection. Focus is
    /// not moved.
    pub fn new(doc: &mut Document, root: ElementId) -> WidgetResult<Self> {
        if !doc.contains(root) {
            return Err(WidgetError::UnknownElement(root));
        }
        let tablist = doc
            .query(root, |el| el.attr(aria::ROLE) == Some(aria::ROLE_TABLIST))
            .first()
            .copied()
            .ok_or(WidgetError::MissingMarker {
                controller: "tabs",
                root,
                marker: "role=\"tablist\"",
            })?;

        let tabs = Self { root, tablist };
        let all = tabs.tabs(doc);
        let initial = all
            .iter()
            .copied()
            .find(|t| doc.bool_attr(*t, aria::SELECTED) == Some(true))
            .or_else(|| all.first().copied())
            .ok_or(WidgetError::EmptyWidget {
                controller: "tabs",
                root,
                what: "tabs",
            })?;
        tabs.apply_selection(doc, initial);
        Ok(tabs)
    }

    /// Create and attach to a page.
    pub fn attach(page: &mut Page, root: ElementId) -> WidgetResult<Handle<Self>> {
        let tabs = Self::new(page.document_mut(), root)?;
        Ok(page.attach(tabs))
    }

    /// Tabs of this group in document order.
    pub fn tabs(&self, doc: &Document) -> Vec<ElementId> {
        doc.query(self.tablist, |el| el.attr(aria::ROLE) == Some(aria::ROLE_TAB))
    }

    /// The selected tab.
    pub fn selected(&self, doc: &Document) -> Option<ElementId> {
        self.tabs(doc)
            .into_iter()
            .find(|t| doc.bool_attr(*t, aria::SELECTED) == Some(true))
    }

    /// Panel associated with a tab, if it exists.
    pub fn panel_for(&self, doc: &Document, tab: ElementId) -> Option<ElementId> {
        doc.attr(tab, aria::CONTROLS)
            .and_then(|panel_id| doc.element_by_id(panel_id))
    }

    /// Select `tab`, show its panel and focus it. Tabs outside this group
    /// are ignored.
    pub fn select(&mut self, cx: &mut WidgetContext<'_>, tab: ElementId) {
        let all = self.tabs(cx.doc);
        let Some(position) = all.iter().position(|t| *t == tab) else {
            tracing::debug!(controller = "tabs", tab = %tab, "not a tab of this group, ignoring");
            return;
        };

        let changed = self.selected(cx.doc) != Some(tab);
        self.apply_selection(cx.doc, tab);
        cx.doc.focus(tab);

        if changed {
            tracing::debug!(controller = "tabs", root = %self.root, tab = %tab, "selected tab");
            let name = cx.doc.accessible_name(tab).unwrap_or("Tab").to_string();
            cx.announce(
                format!("{name} tab, {} of {}", position + 1, all.len()),
                AnnouncementPriority::Normal,
            );
        }
    }

    fn apply_selection(&self, doc: &mut Document, tab: ElementId) {
        for other in self.tabs(doc) {
            doc.set_bool_attr(other, aria::SELECTED, false);
            doc.set_attr(other, aria::TAB_INDEX, "-1");
            if let Some(panel) = self.panel_for(doc, other) {
                doc.set_hidden(panel, true);
            }
        }
        doc.set_bool_attr(tab, aria::SELECTED, true);
        doc.set_attr(tab, aria::TAB_INDEX, "0");
        if let Some(panel) = self.panel_for(doc, tab) {
            doc.set_hidden(panel, false);
        }
    }

    fn navigate(&mut self, cx: &mut WidgetContext<'_>, event: &UiEvent) -> bool {
        let all = self.tabs(cx.doc);
        let active = cx.doc.active_element();
        let Some(current) = all.iter().position(|t| *t == active) else {
            return false;
        };

        let last = all.len() - 1;
        let next = if cx.is_action(WidgetAction::NextTab, event) {
            if current == last { 0 } else { current + 1 }
        } else if cx.is_action(WidgetAction::PrevTab, event) {
            if current == 0 { last } else { current - 1 }
        } else if cx.is_action(WidgetAction::FirstTab, event) {
            0
        } else if cx.is_action(WidgetAction::LastTab, event) {
            last
        } else {
            return false;
        };

        self.select(cx, all[next]);
        true
    }
}

impl Controller for Tabs {
    fn kind(&self) -> &'static str {
        "tabs"
    }

    fn root(&self) -> ElementId {
        self.root
    }

    fn subscriptions(&self) -> Vec<(ListenerScope, EventKind)> {
        vec![
            (ListenerScope::Element(self.tablist), EventKind::Click),
            (ListenerScope::Element(self.tablist), EventKind::KeyDown),
        ]
    }

    fn handle(&mut self, event: &UiEvent, cx: &mut WidgetContext<'_>) {
        match event {
            UiEvent::Click { target } => {
                let tab = self
                    .tabs(cx.doc)
                    .into_iter()
                    .find(|t| cx.doc.contains_node(*t, *target));
                if let Some(tab) = tab {
                    self.select(cx, tab);
                }
            }
            UiEvent::Key { .. } => {
                if self.navigate(cx, event) {
                    cx.prevent_default();
                }
            }
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Markup;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use proptest::prelude::*;

    fn tab_group(count: usize, selected: Option<usize>) -> Markup {
        let tabs = (0..count).map(|i| {
            Markup::container()
                .label(format!("Tab {}", i + 1))
                .id(format!("tab{i}"))
                .attr(aria::ROLE, aria::ROLE_TAB)
                .attr(aria::SELECTED, if Some(i) == selected { "true" } else { "false" })
                .attr(aria::CONTROLS, format!("panel{i}"))
        });
        let panels = (0..count).map(|i| {
            let panel = Markup::container()
                .id(format!("panel{i}"))
                .attr(aria::ROLE, aria::ROLE_TABPANEL)
                .attr(aria::LABELLED_BY, format!("tab{i}"));
            if Some(i) == selected {
                panel
            } else {
                panel.hidden()
            }
        });
        Markup::container()
            .child(Markup::container().attr(aria::ROLE, aria::ROLE_TABLIST).children(tabs))
            .children(panels)
    }

    fn setup(count: usize, selected: Option<usize>) -> (Page, Handle<Tabs>, Vec<ElementId>, Vec<ElementId>) {
        let mut page = Page::new();
        let doc = page.document_mut();
        let body = doc.body();
        let root = tab_group(count, selected).mount(doc, body).unwrap();
        let tabs = (0..count).map(|i| doc.element_by_id(&format!("tab{i}")).unwrap()).collect();
        let panels = (0..count).map(|i| doc.element_by_id(&format!("panel{i}")).unwrap()).collect();
        let handle = Tabs::attach(&mut page, root).unwrap();
        (page, handle, tabs, panels)
    }

    fn assert_only_selected(page: &Page, tabs: &[ElementId], panels: &[ElementId], i: usize) {
        let doc = page.document();
        for (j, (tab, panel)) in tabs.iter().zip(panels).enumerate() {
            assert_eq!(doc.bool_attr(*tab, aria::SELECTED), Some(i == j), "tab {j}");
            assert_eq!(doc.is_hidden(*panel), i != j, "panel {j}");
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_select_second_tab() {
        let (mut page, _, tabs, panels) = setup(2, Some(0));
        page.click(tabs[1]);

        assert_only_selected(&page, &tabs, &panels, 1);
        assert_eq!(page.document().focused(), Some(tabs[1]));
    }

    #[test]
    fn test_roving_tabindex() {
        let (mut page, _, tabs, _) = setup(3, Some(0));
        page.click(tabs[2]);

        let doc = page.document();
        assert_eq!(doc.attr(tabs[2], aria::TAB_INDEX), Some("0"));
        assert_eq!(doc.attr(tabs[0], aria::TAB_INDEX), Some("-1"));
        assert_eq!(doc.focusable_within(doc.body()), vec![tabs[2]]);
    }

    #[test]
    fn test_arrow_keys_wrap() {
        let (mut page, _, tabs, panels) = setup(3, Some(0));
        page.click(tabs[0]);

        page.press_key(key(KeyCode::Left));
        assert_only_selected(&page, &tabs, &panels, 2);
        assert_eq!(page.document().focused(), Some(tabs[2]));

        page.press_key(key(KeyCode::Right));
        assert_only_selected(&page, &tabs, &panels, 0);

        page.press_key(key(KeyCode::End));
        assert_only_selected(&page, &tabs, &panels, 2);

        page.press_key(key(KeyCode::Home));
        assert_only_selected(&page, &tabs, &panels, 0);
    }

    #[test]
    fn test_arrows_ignored_outside_tablist() {
        let (mut page, _, tabs, panels) = setup(2, Some(0));
        page.document_mut().blur();
        page.press_key(key(KeyCode::Right));
        assert_only_selected(&page, &tabs, &panels, 0);
    }

    #[test]
    fn test_attach_normalizes_selection() {
        let (page, handle, tabs, panels) = setup(3, None);
        assert_only_selected(&page, &tabs, &panels, 0);
        assert_eq!(page.document().focused(), None);

        let mut page = page;
        let selected = page.with(handle, |t, cx| t.selected(cx.doc)).unwrap();
        assert_eq!(selected, Some(tabs[0]));
    }

    #[test]
    fn test_attach_collapses_double_selection() {
        let mut page = Page::new();
        let doc = page.document_mut();
        let body = doc.body();
        let root = tab_group(3, Some(1)).mount(doc, body).unwrap();
        let tab2 = doc.element_by_id("tab2").unwrap();
        doc.set_bool_attr(tab2, aria::SELECTED, true);

        Tabs::attach(&mut page, root).unwrap();
        let doc = page.document();
        assert_eq!(doc.bool_attr(tab2, aria::SELECTED), Some(false));
        assert!(doc.is_hidden(doc.element_by_id("panel2").unwrap()));
        assert!(!doc.is_hidden(doc.element_by_id("panel1").unwrap()));
    }

    #[test]
    fn test_rejects_missing_tablist() {
        let mut doc = Document::new();
        let body = doc.body();
        let root = Markup::container().mount(&mut doc, body).unwrap();
        assert!(matches!(
            Tabs::new(&mut doc, root),
            Err(WidgetError::MissingMarker { controller: "tabs", .. })
        ));
    }

    #[test]
    fn test_announcement_position() {
        let (mut page, _, tabs, _) = setup(3, Some(0));
        page.click(tabs[1]);
        page.click(tabs[1]);
        let messages: Vec<_> = page.drain_announcements().into_iter().map(|a| a.message).collect();
        assert_eq!(messages, vec!["Tab 2 tab, 2 of 3"]);
    }

    proptest! {
        #[test]
        fn test_single_selection_invariant(
            count in 2usize..6,
            picks in prop::collection::vec(0usize..6, 1..20),
        ) {
            let (mut page, _, tabs, panels) = setup(count, Some(0));
            for pick in picks {
                let i = pick % count;
                page.click(tabs[i]);

                let doc = page.document();
                let selected = tabs.iter().filter(|t| doc.bool_attr(**t, aria::SELECTED) == Some(true)).count();
                let visible = panels.iter().filter(|p| !doc.is_hidden(**p)).count();
                prop_assert_eq!(selected, 1);
                prop_assert_eq!(visible, 1);
                prop_assert_eq!(doc.focused(), Some(tabs[i]));
            }
        }
    }
}
