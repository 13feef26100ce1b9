//! Declarative construction of element subtrees.

use super::{Document, ElementId, ElementKind, HIDDEN};
use crate::error::WidgetError;

/// Builder for a subtree of elements.
///
/// # Example
///
/// ```
/// use a11y_widgets::{Document, Markup};
///
/// let mut doc = Document::new();
/// let body = doc.body();
/// let root = Markup::container()
///     .id("faq")
///     .child(Markup::button("Shipping").attr("aria-expanded", "false"))
///     .mount(&mut doc, body)
///     .unwrap();
/// assert_eq!(doc.element_by_id("faq"), Some(root));
/// ```
#[derive(Debug, Clone)]
pub struct Markup {
    kind: ElementKind,
    label: Option<String>,
    attrs: Vec<(String, String)>,
    children: Vec<Markup>,
}

impl Markup {
    /// Start an element of the given kind.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            label: None,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Generic container.
    pub fn container() -> Self {
        Self::new(ElementKind::Container)
    }

    /// Button with a label.
    pub fn button(label: impl Into<String>) -> Self {
        Self::new(ElementKind::Button).label(label)
    }

    /// Link with a label and target.
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self::new(ElementKind::Link).label(label).attr("href", href)
    }

    /// Text input.
    pub fn input(name: impl Into<String>) -> Self {
        Self::new(ElementKind::Input).attr("name", name)
    }

    /// Text run.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(ElementKind::Text).label(content)
    }

    /// Set the visible label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the `id` attribute.
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Set an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Set a valueless attribute such as `disabled`.
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.attr(name, "")
    }

    /// Mark the element hidden.
    pub fn hidden(self) -> Self {
        self.flag(HIDDEN)
    }

    /// Append a child.
    pub fn child(mut self, child: Markup) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children.
    pub fn children(mut self, children: impl IntoIterator<Item = Markup>) -> Self {
        self.children.extend(children);
        self
    }

    /// Create the subtree in `doc` without attaching it.
    pub fn build(self, doc: &mut Document) -> ElementId {
        let id = doc.create(self.kind);
        if let Some(label) = self.label {
            doc.set_label(id, label);
        }
        for (name, value) in self.attrs {
            doc.set_attr(id, &name, value);
        }
        for child in self.children {
            let child_id = child.build(doc);
            // Both ids were just created and the child is fresh, so this
            // cannot form a cycle.
            let _ = doc.append(id, child_id);
        }
        id
    }

    /// Create the subtree and append it under `parent`.
    pub fn mount(self, doc: &mut Document, parent: ElementId) -> Result<ElementId, WidgetError> {
        let id = self.build(doc);
        doc.append(parent, id)?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_nested() {
        let mut doc = Document::new();
        let body = doc.body();
        let root = Markup::container()
            .id("root")
            .child(Markup::button("One").id("one"))
            .child(Markup::container().hidden().child(Markup::link("Two", "#two").id("two")))
            .mount(&mut doc, body)
            .unwrap();

        let one = doc.element_by_id("one").unwrap();
        let two = doc.element_by_id("two").unwrap();
        assert_eq!(doc.label(one), Some("One"));
        assert!(doc.contains_node(root, two));
        assert!(doc.is_hidden(two));
        assert_eq!(doc.focusable_within(root), vec![one]);
    }

    #[test]
    fn test_build_is_detached() {
        let mut doc = Document::new();
        let id = Markup::button("Loose").build(&mut doc);
        assert!(doc.get(id).is_some());
        assert!(!doc.contains(id));
    }
}
