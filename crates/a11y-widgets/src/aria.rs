//! Marker attribute names used by the controllers.

pub const ROLE: &str = "role";
pub const EXPANDED: &str = "aria-expanded";
pub const SELECTED: &str = "aria-selected";
pub const CONTROLS: &str = "aria-controls";
pub const LABELLED_BY: &str = "aria-labelledby";
pub const HAS_POPUP: &str = "aria-haspopup";
pub const MODAL: &str = "aria-modal";
pub const ARIA_HIDDEN: &str = "aria-hidden";
pub const TAB_INDEX: &str = "tabindex";
pub const ID: &str = "id";

/// Marks a control inside a dialog that closes it.
pub const DATA_DISMISS: &str = "data-dismiss";

/// Set on an accordion root once attached; toggles under a nested root
/// belong to the nested accordion.
pub const DATA_ACCORDION: &str = "data-accordion";

pub const ROLE_DIALOG: &str = "dialog";
pub const ROLE_ALERT_DIALOG: &str = "alertdialog";
pub const ROLE_TABLIST: &str = "tablist";
pub const ROLE_TAB: &str = "tab";
pub const ROLE_TABPANEL: &str = "tabpanel";
