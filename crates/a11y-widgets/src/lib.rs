//! # a11y-widgets
//!
//! Interaction controllers for the common accessible widget patterns:
//! modal dialogs, accordions, tab sets and dropdown menus.
//!
//! Controllers attach to an already-built element tree (a [`Document`])
//! and make it keyboard operable and correctly announced to assistive
//! technology. They never render anything themselves.
//!
//! ## Components
//!
//! - [`Modal`] - Focus-trapping dialog with opener focus restoration
//! - [`Accordion`] - Independent disclosure sections
//! - [`Tabs`] - Single-selection tab set with roving tabindex
//! - [`Dropdown`] - Popup menu closed by outside press or Escape
//!
//! ## Architecture
//!
//! - All widget state lives in marker attributes (`aria-expanded`,
//!   `aria-selected`, `aria-hidden`, `hidden`, `tabindex`) on the tree
//! - A [`Page`] owns the document and its controllers and dispatches
//!   events innermost-first
//! - Keys are resolved through a configurable [`Keymap`](a11y_keybinds::Keymap)
//!
//! ```
//! use a11y_widgets::{aria, Accordion, Markup, Page};
//!
//! let mut page = Page::new();
//! let body = page.document().body();
//! let root = Markup::container()
//!     .child(
//!         Markup::button("Shipping")
//!             .attr(aria::EXPANDED, "false")
//!             .attr(aria::CONTROLS, "shipping"),
//!     )
//!     .child(Markup::container().id("shipping").hidden())
//!     .mount(page.document_mut(), body)
//!     .unwrap();
//!
//! Accordion::attach(&mut page, root).unwrap();
//! let toggle = page.document().query(root, |el| el.label.is_some())[0];
//! page.click(toggle);
//! assert_eq!(page.document().attr(toggle, aria::EXPANDED), Some("true"));
//! ```

mod accessibility;
mod accordion;
pub mod aria;
mod config;
mod dom;
mod dropdown;
mod error;
mod event;
mod modal;
mod page;
mod tabs;

pub use accessibility::{
    AccessibilityConfig, Announcement, AnnouncementBuffer, AnnouncementPriority,
};
pub use accordion::Accordion;
pub use config::{DropdownConfig, InitialFocus, KeysConfig, ModalConfig, WidgetConfig};
pub use dom::{Document, Element, ElementId, ElementKind, Markup, HIDDEN};
pub use dropdown::Dropdown;
pub use error::{ConfigError, WidgetError, WidgetResult};
pub use event::{EventKind, ListenerScope, UiEvent, WidgetContext};
pub use modal::Modal;
pub use page::{Controller, ControllerId, FocusDirection, Handle, Page};
pub use tabs::Tabs;

pub use a11y_keybinds as keybinds;
