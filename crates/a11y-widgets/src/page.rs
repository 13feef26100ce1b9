//! The host page: document, attached controllers and event dispatch.

use crate::accessibility::{Announcement, AnnouncementBuffer};
use crate::config::WidgetConfig;
use crate::dom::{Document, ElementId};
use crate::error::{ConfigError, WidgetError, WidgetResult};
use crate::event::{EventKind, ListenerScope, UiEvent, WidgetContext};
use a11y_keybinds::{Keymap, WidgetAction};
use crossterm::event::KeyEvent;
use std::any::Any;
use std::cmp::Reverse;
use std::fmt;
use std::marker::PhantomData;

/// Behaviour attached to one widget root.
///
/// Controllers keep no widget state of their own beyond element handles:
/// every expanded/selected/open flag lives in the root's marker attributes.
pub trait Controller: Any {
    /// Short name for logging ("modal", "tabs", ...).
    fn kind(&self) -> &'static str;

    /// The Widget Root this controller is attached to.
    fn root(&self) -> ElementId;

    /// Listeners to register on attach.
    fn subscriptions(&self) -> Vec<(ListenerScope, EventKind)>;

    /// Handle one event. Runs to completion before the next event.
    fn handle(&mut self, event: &UiEvent, cx: &mut WidgetContext<'_>);

    /// Teardown hook, run before the controller's listeners are removed.
    fn dispose(&mut self, _cx: &mut WidgetContext<'_>) {}

    /// Downcast support for typed [`Handle`]s.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Untyped id of an attached controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControllerId(usize);

impl fmt::Display for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "controller {}", self.0)
    }
}

/// Typed handle returned by [`Page::attach`].
pub struct Handle<T> {
    id: ControllerId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    /// Untyped id.
    pub fn id(&self) -> ControllerId {
        self.id
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.id.0).finish()
    }
}

#[derive(Debug, Clone, Copy)]
struct Listener {
    owner: ControllerId,
    scope: ListenerScope,
    kind: EventKind,
}

/// Direction of sequential focus navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    /// Tab
    Forward,
    /// Shift+Tab
    Backward,
}

/// A document plus the controllers wired into it.
pub struct Page {
    doc: Document,
    config: WidgetConfig,
    keymap: Keymap,
    announcements: AnnouncementBuffer,
    controllers: Vec<Option<Box<dyn Controller>>>,
    listeners: Vec<Listener>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// Empty page with default configuration.
    pub fn new() -> Self {
        Self::from_parts(Document::new(), WidgetConfig::default(), Keymap::default())
    }

    /// Empty page with the given configuration.
    pub fn with_config(config: WidgetConfig) -> Result<Self, ConfigError> {
        let keymap = config.keymap()?;
        Ok(Self::from_parts(Document::new(), config, keymap))
    }

    fn from_parts(doc: Document, config: WidgetConfig, keymap: Keymap) -> Self {
        Self {
            doc,
            config,
            keymap,
            announcements: AnnouncementBuffer::new(),
            controllers: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The document, for building markup.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Active configuration.
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Active keymap.
    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Attach a controller and register its listeners.
    pub fn attach<T: Controller>(&mut self, controller: T) -> Handle<T> {
        let id = ControllerId(self.controllers.len());
        for (scope, kind) in controller.subscriptions() {
            self.listeners.push(Listener {
                owner: id,
                scope,
                kind,
            });
        }
        tracing::debug!(
            controller = controller.kind(),
            root = %controller.root(),
            id = id.0,
            "attached controller"
        );
        self.controllers.push(Some(Box::new(controller)));
        Handle {
            id,
            _marker: PhantomData,
        }
    }

    /// Run the controller's teardown and unsubscribe all of its listeners.
    pub fn dispose(&mut self, id: ControllerId) -> WidgetResult<()> {
        let mut controller = self
            .controllers
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(WidgetError::UnknownController(id.0))?;

        let mut cx = WidgetContext::new(&mut self.doc, &self.keymap, &self.config, &mut self.announcements);
        controller.dispose(&mut cx);
        self.listeners.retain(|l| l.owner != id);
        tracing::debug!(controller = controller.kind(), id = id.0, "disposed controller");
        Ok(())
    }

    /// Whether a controller is still attached.
    pub fn is_attached(&self, id: ControllerId) -> bool {
        matches!(self.controllers.get(id.0), Some(Some(_)))
    }

    /// Attached controllers.
    pub fn controllers(&self) -> impl Iterator<Item = (ControllerId, &dyn Controller)> {
        self.controllers
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_deref().map(|c| (ControllerId(i), c)))
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Run an operation on a typed controller.
    pub fn with<T: Controller, R>(
        &mut self,
        handle: Handle<T>,
        f: impl FnOnce(&mut T, &mut WidgetContext<'_>) -> R,
    ) -> WidgetResult<R> {
        let controller = self
            .controllers
            .get_mut(handle.id.0)
            .and_then(Option::as_mut)
            .and_then(|c| c.as_any_mut().downcast_mut::<T>())
            .ok_or(WidgetError::UnknownController(handle.id.0))?;

        let mut cx = WidgetContext::new(&mut self.doc, &self.keymap, &self.config, &mut self.announcements);
        Ok(f(controller, &mut cx))
    }

    /// Remove a subtree, disposing every controller rooted inside it.
    pub fn remove_element(&mut self, id: ElementId) -> Vec<ElementId> {
        let doomed: Vec<ControllerId> = self
            .controllers()
            .filter(|(_, c)| self.doc.contains_node(id, c.root()))
            .map(|(cid, _)| cid)
            .collect();
        for cid in doomed {
            // Ids come straight from the attached set.
            let _ = self.dispose(cid);
        }
        self.doc.remove(id)
    }

    /// Pointer press on `target`.
    ///
    /// Focus moves to the nearest focusable ancestor-or-self (or back to
    /// the body), then `Click` is dispatched. Disabled targets are inert.
    pub fn click(&mut self, target: ElementId) {
        if !self.doc.contains(target) || self.doc.has_attr(target, "disabled") {
            return;
        }

        let mut current = Some(target);
        let mut focus_target = None;
        while let Some(el) = current {
            if self.doc.is_focusable(el) {
                focus_target = Some(el);
                break;
            }
            current = self.doc.get(el).and_then(|e| e.parent());
        }
        match focus_target {
            Some(el) => {
                self.doc.focus(el);
            }
            None => self.doc.blur(),
        }

        self.dispatch(UiEvent::Click { target });
    }

    /// Key press at the active element, followed by the default action
    /// unless a handler prevented it.
    pub fn press_key(&mut self, key: KeyEvent) {
        let target = self.doc.active_element();
        if self.dispatch(UiEvent::Key { target, key }) {
            return;
        }

        if self.keymap.is(WidgetAction::FocusNext, &key) {
            self.move_focus(FocusDirection::Forward);
        } else if self.keymap.is(WidgetAction::FocusPrev, &key) {
            self.move_focus(FocusDirection::Backward);
        } else if self.keymap.is(WidgetAction::Activate, &key)
            && self.doc.get(target).is_some_and(|el| el.is_activatable())
        {
            // Native controls turn Enter/Space into a click.
            self.dispatch(UiEvent::Click { target });
        }
    }

    /// Default sequential focus navigation over the whole document,
    /// wrapping at both ends.
    pub fn move_focus(&mut self, direction: FocusDirection) -> Option<ElementId> {
        let body = self.doc.body();
        let order = self.doc.descendants(body);
        let current = self
            .doc
            .focused()
            .and_then(|f| order.iter().position(|id| *id == f));

        let tabbable = |id: &&ElementId| self.doc.is_tabbable(**id);
        let next = match (direction, current) {
            (FocusDirection::Forward, Some(pos)) => order[pos + 1..]
                .iter()
                .find(tabbable)
                .or_else(|| order.iter().find(tabbable)),
            (FocusDirection::Forward, None) => order.iter().find(tabbable),
            (FocusDirection::Backward, Some(pos)) => order[..pos]
                .iter()
                .rev()
                .find(tabbable)
                .or_else(|| order.iter().rev().find(tabbable)),
            (FocusDirection::Backward, None) => order.iter().rev().find(tabbable),
        }
        .copied();

        if let Some(id) = next {
            self.doc.focus(id);
        }
        next
    }

    /// Deliver an event to every subscribed controller. Returns whether the
    /// default action was prevented.
    ///
    /// Controllers are called innermost first: element-scoped listeners by
    /// the depth of their element, document-scoped listeners by the depth of
    /// their root when it contains the target, and otherwise last. Ties keep
    /// registration order. Each controller sees an event at most once.
    pub fn dispatch(&mut self, event: UiEvent) -> bool {
        let target = event.target();
        let kind = event.kind();

        let mut hits: Vec<(usize, usize, ControllerId)> = Vec::new();
        for (order, listener) in self.listeners.iter().enumerate() {
            if listener.kind != kind {
                continue;
            }
            let rank = match listener.scope {
                ListenerScope::Element(el) if self.doc.contains_node(el, target) => {
                    self.depth(el) + 1
                }
                ListenerScope::Element(_) => continue,
                ListenerScope::Document => {
                    let root = self.controllers[listener.owner.0]
                        .as_ref()
                        .map(|c| c.root());
                    match root {
                        Some(root) if self.doc.contains_node(root, target) => self.depth(root) + 1,
                        _ => 0,
                    }
                }
            };
            hits.push((rank, order, listener.owner));
        }
        hits.sort_by_key(|(rank, order, _)| (Reverse(*rank), *order));

        let mut seen = Vec::with_capacity(hits.len());
        let mut cx = WidgetContext::new(&mut self.doc, &self.keymap, &self.config, &mut self.announcements);
        for (_, _, owner) in hits {
            if seen.contains(&owner) {
                continue;
            }
            seen.push(owner);
            if let Some(controller) = self.controllers[owner.0].as_mut() {
                controller.handle(&event, &mut cx);
            }
            if cx.is_propagation_stopped() {
                break;
            }
        }
        cx.is_default_prevented()
    }

    fn depth(&self, id: ElementId) -> usize {
        let mut depth = 0;
        let mut current = self.doc.get(id).and_then(|el| el.parent());
        while let Some(parent) = current {
            depth += 1;
            current = self.doc.get(parent).and_then(|el| el.parent());
        }
        depth
    }

    /// Take the next pending announcement.
    pub fn next_announcement(&mut self) -> Option<Announcement> {
        self.announcements.next()
    }

    /// Drain all pending announcements in reading order.
    pub fn drain_announcements(&mut self) -> Vec<Announcement> {
        std::iter::from_fn(|| self.announcements.next()).collect()
    }
}
