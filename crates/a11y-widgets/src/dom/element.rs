//! Elements of the document tree.

use std::collections::BTreeMap;
use std::fmt;

/// Handle to an element in a [`Document`](super::Document).
///
/// Arena slots are recycled, but each reuse bumps the slot's generation, so
/// a handle is never issued twice. Once an element is removed its handle
/// simply stops resolving, so holding one is a weak reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId {
    pub(crate) index: usize,
    pub(crate) generation: u64,
}

impl ElementId {
    /// Arena slot, useful for logging. Shared by successive elements.
    pub fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.generation {
            0 => write!(f, "#{}", self.index),
            generation => write!(f, "#{}v{generation}", self.index),
        }
    }
}

/// What kind of element a node is.
///
/// Only the distinctions that matter for focus and activation are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// The document body
    Body,
    /// Generic container (div, section, ul, ...)
    Container,
    /// Natively activatable button
    Button,
    /// Anchor; focusable and activatable only with an `href`
    Link,
    /// Form input
    Input,
    /// Plain text run
    Text,
}

impl ElementKind {
    /// Tag-like name used when printing the tree.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Container => "div",
            Self::Button => "button",
            Self::Link => "a",
            Self::Input => "input",
            Self::Text => "text",
        }
    }
}

/// A single node in the document.
#[derive(Debug, Clone)]
pub struct Element {
    /// Element kind
    pub kind: ElementKind,
    /// Visible label or text content
    pub label: Option<String>,
    pub(crate) attrs: BTreeMap<String, String>,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
}

impl Element {
    pub(crate) fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            label: None,
            attrs: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Attribute value, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// All attributes in name order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parent element.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Children in document order.
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Parsed `tabindex`, if present and numeric.
    pub fn tab_index(&self) -> Option<i32> {
        self.attr("tabindex").and_then(|v| v.trim().parse().ok())
    }

    /// Whether this element can take focus at all, ignoring ancestors.
    ///
    /// Any numeric `tabindex` makes an element focusable; a negative one
    /// only keeps it out of sequential navigation.
    pub fn is_focusable_kind(&self) -> bool {
        if self.attrs.contains_key("disabled") {
            return false;
        }
        self.tab_index().is_some()
            || match self.kind {
                ElementKind::Button | ElementKind::Input => true,
                ElementKind::Link => self.attrs.contains_key("href"),
                _ => false,
            }
    }

    /// Whether Tab / Shift+Tab can reach this element, ignoring ancestors.
    pub fn is_tabbable_kind(&self) -> bool {
        self.is_focusable_kind() && self.tab_index().map_or(true, |n| n >= 0)
    }

    /// Whether Enter/Space activate this element like a click.
    pub fn is_activatable(&self) -> bool {
        !self.attrs.contains_key("disabled")
            && match self.kind {
                ElementKind::Button => true,
                ElementKind::Link => self.attrs.contains_key("href"),
                _ => false,
            }
    }
}
