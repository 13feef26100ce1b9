//! Headless document model.
//!
//! A [`Document`] is an arena of [`Element`]s rooted at a body node, with a
//! single global focus target. Attributes are the only widget state: the
//! controllers read and write ARIA markers directly on elements.

mod element;
mod markup;

pub use element::{Element, ElementId, ElementKind};
pub use markup::Markup;

use crate::error::WidgetError;

/// Attribute marking an element (and its subtree) as not rendered.
pub const HIDDEN: &str = "hidden";

#[derive(Debug, Clone)]
struct Slot {
    generation: u64,
    element: Option<Element>,
}

/// The element tree and its focus state.
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    /// Emptied slots, reused last-in first-out.
    free: Vec<usize>,
    body: ElementId,
    focused: Option<ElementId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding an empty body.
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                element: Some(Element::new(ElementKind::Body)),
            }],
            free: Vec::new(),
            body: ElementId {
                index: 0,
                generation: 0,
            },
            focused: None,
        }
    }

    /// The body element.
    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Create a detached element.
    pub fn create(&mut self, kind: ElementKind) -> ElementId {
        let element = Some(Element::new(kind));
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.element = element;
            return ElementId {
                index,
                generation: slot.generation,
            };
        }
        self.slots.push(Slot {
            generation: 0,
            element,
        });
        ElementId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    /// Look up an element, connected or not.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_ref())
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_mut())
    }

    /// Append `child` as the last child of `parent`, moving it if it
    /// already has a parent.
    pub fn append(&mut self, parent: ElementId, child: ElementId) -> Result<(), WidgetError> {
        if self.get(parent).is_none() {
            return Err(WidgetError::UnknownElement(parent));
        }
        if self.get(child).is_none() {
            return Err(WidgetError::UnknownElement(child));
        }
        if child == self.body || self.contains_node(child, parent) {
            return Err(WidgetError::HierarchyCycle { parent, child });
        }

        self.detach(child);
        if let Some(el) = self.get_mut(child) {
            el.parent = Some(parent);
        }
        if let Some(el) = self.get_mut(parent) {
            el.children.push(child);
        }
        Ok(())
    }

    fn detach(&mut self, id: ElementId) {
        let parent = self.get_mut(id).and_then(|el| el.parent.take());
        if let Some(parent) = parent.and_then(|p| self.get_mut(p)) {
            parent.children.retain(|c| *c != id);
        }
    }

    /// Remove an element and its whole subtree from the document.
    ///
    /// Returns the removed handles, which stop resolving immediately. If focus was inside the subtree it
    /// falls back to the body. The body itself cannot be removed.
    pub fn remove(&mut self, id: ElementId) -> Vec<ElementId> {
        if id == self.body || self.get(id).is_none() {
            return Vec::new();
        }

        let mut removed = vec![id];
        removed.extend(self.descendants(id));

        self.detach(id);
        if self.focused.is_some_and(|f| removed.contains(&f)) {
            self.focused = None;
        }
        for gone in &removed {
            if let Some(slot) = self.slots.get_mut(gone.index) {
                slot.element = None;
                slot.generation += 1;
                self.free.push(gone.index);
            }
        }
        removed
    }

    /// Whether the element exists and is attached under the body.
    pub fn contains(&self, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.body {
                return true;
            }
            current = self.get(node).and_then(|el| el.parent);
        }
        false
    }

    /// Inclusive containment: `node` is `ancestor` or one of its descendants.
    pub fn contains_node(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.get(n).and_then(|el| el.parent);
        }
        false
    }

    /// Descendants of `root` in document order, `root` excluded.
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = match self.get(root) {
            Some(el) => el.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(el) = self.get(id) {
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }

    /// Descendants of `root` matching a predicate, in document order.
    pub fn query(&self, root: ElementId, predicate: impl Fn(&Element) -> bool) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| self.get(*id).is_some_and(&predicate))
            .collect()
    }

    /// First connected element whose `id` attribute equals `html_id`.
    pub fn element_by_id(&self, html_id: &str) -> Option<ElementId> {
        std::iter::once(self.body)
            .chain(self.descendants(self.body))
            .find(|id| self.attr(*id, "id") == Some(html_id))
    }

    /// Attribute value on an element.
    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id).and_then(|el| el.attr(name))
    }

    /// Whether an element carries an attribute.
    pub fn has_attr(&self, id: ElementId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    /// Set an attribute. Unknown elements are ignored.
    pub fn set_attr(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.get_mut(id) {
            el.attrs.insert(name.to_string(), value.into());
        }
    }

    /// Remove an attribute. Unknown elements are ignored.
    pub fn remove_attr(&mut self, id: ElementId, name: &str) {
        if let Some(el) = self.get_mut(id) {
            el.attrs.remove(name);
        }
    }

    /// Read a `"true"`/`"false"` marker. Anything else reads as `None`.
    pub fn bool_attr(&self, id: ElementId, name: &str) -> Option<bool> {
        match self.attr(id, name)?.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    /// Write a `"true"`/`"false"` marker.
    pub fn set_bool_attr(&mut self, id: ElementId, name: &str, value: bool) {
        self.set_attr(id, name, if value { "true" } else { "false" });
    }

    /// Visible label of an element.
    pub fn label(&self, id: ElementId) -> Option<&str> {
        self.get(id).and_then(|el| el.label.as_deref())
    }

    /// Replace the visible label of an element.
    pub fn set_label(&mut self, id: ElementId, label: impl Into<String>) {
        if let Some(el) = self.get_mut(id) {
            el.label = Some(label.into());
        }
    }

    /// Name assistive technology would read: `aria-label`, then the label
    /// of the `aria-labelledby` element, then the element's own label.
    pub fn accessible_name(&self, id: ElementId) -> Option<&str> {
        self.attr(id, "aria-label")
            .or_else(|| {
                self.attr(id, "aria-labelledby")
                    .and_then(|by| self.element_by_id(by))
                    .and_then(|by| self.label(by))
            })
            .or_else(|| self.label(id))
    }

    /// Whether the element or any ancestor is hidden.
    pub fn is_hidden(&self, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(n) = current {
            match self.get(n) {
                Some(el) if el.attrs.contains_key(HIDDEN) => return true,
                Some(el) => current = el.parent,
                None => return true,
            }
        }
        false
    }

    /// Add or remove the `hidden` attribute.
    pub fn set_hidden(&mut self, id: ElementId, hidden: bool) {
        if hidden {
            self.set_attr(id, HIDDEN, "");
        } else {
            self.remove_attr(id, HIDDEN);
        }
    }

    /// Whether focus can be moved to the element right now.
    pub fn is_focusable(&self, id: ElementId) -> bool {
        self.contains(id)
            && self.get(id).is_some_and(Element::is_focusable_kind)
            && !self.is_hidden(id)
    }

    /// Whether sequential (Tab) navigation can reach the element right now.
    pub fn is_tabbable(&self, id: ElementId) -> bool {
        self.is_focusable(id) && self.get(id).is_some_and(Element::is_tabbable_kind)
    }

    /// The Focusable Element Set of `root`: every tabbable descendant in
    /// document order, recomputed on every call.
    pub fn focusable_within(&self, root: ElementId) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| self.is_tabbable(*id))
            .collect()
    }

    /// Element holding focus, if any.
    pub fn focused(&self) -> Option<ElementId> {
        self.focused.filter(|id| self.contains(*id))
    }

    /// Focused element, or the body when nothing is focused.
    pub fn active_element(&self) -> ElementId {
        self.focused().unwrap_or(self.body)
    }

    /// Move focus to an element. Returns false (and leaves focus alone)
    /// when the element cannot take focus.
    pub fn focus(&mut self, id: ElementId) -> bool {
        if id == self.body {
            self.focused = None;
            return true;
        }
        if !self.is_focusable(id) {
            return false;
        }
        self.focused = Some(id);
        true
    }

    /// Drop focus back to the body.
    pub fn blur(&mut self) {
        self.focused = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removed_slots_are_recycled_with_fresh_handles() {
        let mut doc = Document::new();
        let body = doc.body();
        let old = button(&mut doc, body, "old");
        let child = doc.create(ElementKind::Text);
        doc.append(old, child).unwrap();

        assert_eq!(doc.remove(old), vec![old, child]);
        let reused = doc.create(ElementKind::Button);
        let reused_too = doc.create(ElementKind::Button);

        // Both freed slots are taken again before the arena grows.
        let mut indices = vec![reused.index(), reused_too.index()];
        indices.sort_unstable();
        assert_eq!(indices, vec![old.index(), child.index()]);
        assert_ne!(reused, old);
        assert_ne!(reused_too, child);
        assert!(doc.get(old).is_none());
        assert!(doc.get(child).is_none());
        assert!(doc.get(reused).is_some());
        assert_eq!(doc.create(ElementKind::Button).index(), 3);

        // A stale handle cannot touch the new occupant.
        doc.append(body, reused).unwrap();
        assert!(!doc.contains(old));
        assert!(doc.append(body, old).is_err());
    }

    fn button(doc: &mut Document, parent: ElementId, html_id: &str) -> ElementId {
        let id = doc.create(ElementKind::Button);
        doc.set_attr(id, "id", html_id);
        doc.append(parent, id).unwrap();
        id
    }

    #[test]
    fn test_focusable_set_in_document_order() {
        let mut doc = Document::new();
        let body = doc.body();
        let root = doc.create(ElementKind::Container);
        doc.append(body, root).unwrap();

        let a = button(&mut doc, root, "a");
        let group = doc.create(ElementKind::Container);
        doc.append(root, group).unwrap();
        let b = button(&mut doc, group, "b");
        let skipped = button(&mut doc, group, "skipped");
        doc.set_attr(skipped, "tabindex", "-1");
        let c = button(&mut doc, root, "c");

        assert_eq!(doc.focusable_within(root), vec![a, b, c]);

        doc.set_hidden(group, true);
        assert_eq!(doc.focusable_within(root), vec![a, c]);
    }

    #[test]
    fn test_element_by_id_ignores_detached() {
        let mut doc = Document::new();
        let detached = doc.create(ElementKind::Container);
        doc.set_attr(detached, "id", "panel");
        assert_eq!(doc.element_by_id("panel"), None);

        let body = doc.body();
        doc.append(body, detached).unwrap();
        assert_eq!(doc.element_by_id("panel"), Some(detached));
    }

    #[test]
    fn test_remove_drops_focus_and_handles() {
        let mut doc = Document::new();
        let body = doc.body();
        let root = doc.create(ElementKind::Container);
        doc.append(body, root).unwrap();
        let a = button(&mut doc, root, "a");

        assert!(doc.focus(a));
        assert_eq!(doc.active_element(), a);

        let removed = doc.remove(root);
        assert_eq!(removed, vec![root, a]);
        assert!(!doc.contains(a));
        assert_eq!(doc.focused(), None);
        assert_eq!(doc.active_element(), body);
        assert!(!doc.focus(a));
    }

    #[test]
    fn test_append_rejects_cycles() {
        let mut doc = Document::new();
        let body = doc.body();
        let outer = doc.create(ElementKind::Container);
        let inner = doc.create(ElementKind::Container);
        doc.append(body, outer).unwrap();
        doc.append(outer, inner).unwrap();

        assert!(matches!(
            doc.append(inner, outer),
            Err(WidgetError::HierarchyCycle { .. })
        ));
        assert!(doc.append(inner, body).is_err());
    }

    #[test]
    fn test_bool_markers() {
        let mut doc = Document::new();
        let body = doc.body();
        let b = button(&mut doc, body, "b");

        assert_eq!(doc.bool_attr(b, "aria-expanded"), None);
        doc.set_bool_attr(b, "aria-expanded", true);
        assert_eq!(doc.attr(b, "aria-expanded"), Some("true"));
        assert_eq!(doc.bool_attr(b, "aria-expanded"), Some(true));
        doc.set_attr(b, "aria-expanded", "mixed");
        assert_eq!(doc.bool_attr(b, "aria-expanded"), None);
    }

    #[test]
    fn test_hidden_ancestor_blocks_focus() {
        let mut doc = Document::new();
        let body = doc.body();
        let root = doc.create(ElementKind::Container);
        doc.append(body, root).unwrap();
        let a = button(&mut doc, root, "a");

        doc.set_hidden(root, true);
        assert!(doc.is_hidden(a));
        assert!(!doc.focus(a));

        doc.set_hidden(root, false);
        assert!(doc.focus(a));
    }
}
