//! Deterministic widget fixtures.
//!
//! Each fixture mounts well-formed markup for one widget into the page
//! body, attaches its controller and hands back the interesting element
//! handles. Ids are fixed so scripted input can refer to them by name.

use a11y_widgets::{
    aria, Accordion, Dropdown, ElementId, Handle, Markup, Modal, Page, Tabs, WidgetResult,
};

/// Collection of deterministic test fixtures.
pub struct Fixtures;

/// A dialog with a name field, a save button and a dismiss button.
#[derive(Debug, Clone, Copy)]
pub struct ModalFixture {
    pub handle: Handle<Modal>,
    pub opener: ElementId,
    pub dialog: ElementId,
    /// First focusable member (the name field).
    pub first: ElementId,
    /// Last focusable member (the dismiss button).
    pub last: ElementId,
}

#[derive(Debug, Clone)]
pub struct AccordionFixture {
    pub handle: Handle<Accordion>,
    pub root: ElementId,
    pub toggles: Vec<ElementId>,
    pub panels: Vec<ElementId>,
}

#[derive(Debug, Clone)]
pub struct TabsFixture {
    pub handle: Handle<Tabs>,
    pub root: ElementId,
    pub tabs: Vec<ElementId>,
    pub panels: Vec<ElementId>,
}

#[derive(Debug, Clone)]
pub struct DropdownFixture {
    pub handle: Handle<Dropdown>,
    pub root: ElementId,
    pub trigger: ElementId,
    pub menu: ElementId,
    pub items: Vec<ElementId>,
}

/// One of each widget on a single page.
#[derive(Debug, Clone)]
pub struct Gallery {
    pub dropdown: DropdownFixture,
    pub accordion: AccordionFixture,
    pub tabs: TabsFixture,
    pub modal: ModalFixture,
}

impl Fixtures {
    /// Opener button plus a hidden settings dialog.
    pub fn modal(page: &mut Page) -> WidgetResult<ModalFixture> {
        let doc = page.document_mut();
        let body = doc.body();
        let opener = Markup::button("Open settings")
            .id("open-settings")
            .attr(aria::HAS_POPUP, "dialog")
            .attr(aria::CONTROLS, "settings")
            .mount(doc, body)?;
        let dialog = Markup::container()
            .id("settings")
            .attr(aria::ROLE, aria::ROLE_DIALOG)
            .attr(aria::LABELLED_BY, "settings-title")
            .attr(aria::ARIA_HIDDEN, "true")
            .hidden()
            .child(Markup::text("Settings").id("settings-title"))
            .child(Markup::input("display-name").id("settings-name"))
            .child(Markup::button("Save").id("settings-save"))
            .child(
                Markup::button("Cancel")
                    .id("settings-cancel")
                    .flag(aria::DATA_DISMISS),
            )
            .mount(doc, body)?;
        let first = lookup(page, "settings-name")?;
        let last = lookup(page, "settings-cancel")?;

        let handle = Modal::attach(page, dialog)?;
        Ok(ModalFixture {
            handle,
            opener,
            dialog,
            first,
            last,
        })
    }

    /// Accordion with `sections` collapsed sections, each panel holding a
    /// link.
    pub fn accordion(page: &mut Page, sections: usize) -> WidgetResult<AccordionFixture> {
        let doc = page.document_mut();
        let body = doc.body();
        let root = Markup::container()
            .id("faq")
            .children((1..=sections).flat_map(|n| {
                [
                    Markup::button(format!("Question {n}"))
                        .id(format!("faq-toggle-{n}"))
                        .attr(aria::EXPANDED, "false")
                        .attr(aria::CONTROLS, format!("faq-panel-{n}")),
                    Markup::container()
                        .id(format!("faq-panel-{n}"))
                        .hidden()
                        .child(Markup::text(format!("Answer {n}")))
                        .child(Markup::link(format!("More about {n}"), format!("#more-{n}"))),
                ]
            }))
            .mount(doc, body)?;

        let toggles = lookup_all(page, "faq-toggle", sections)?;
        let panels = lookup_all(page, "faq-panel", sections)?;
        let handle = Accordion::attach(page, root)?;
        Ok(AccordionFixture {
            handle,
            root,
            toggles,
            panels,
        })
    }

    /// Tab set with `count` tabs, none marked selected.
    pub fn tabs(page: &mut Page, count: usize) -> WidgetResult<TabsFixture> {
        let doc = page.document_mut();
        let body = doc.body();
        let root = Markup::container()
            .id("sections")
            .child(
                Markup::container()
                    .attr(aria::ROLE, aria::ROLE_TABLIST)
                    .attr("aria-label", "Sections")
                    .children((1..=count).map(|n| {
                        Markup::button(format!("Tab {n}"))
                            .id(format!("tab-{n}"))
                            .attr(aria::ROLE, aria::ROLE_TAB)
                            .attr(aria::SELECTED, "false")
                            .attr(aria::CONTROLS, format!("tabpanel-{n}"))
                    })),
            )
            .children((1..=count).map(|n| {
                Markup::container()
                    .id(format!("tabpanel-{n}"))
                    .attr(aria::ROLE, aria::ROLE_TABPANEL)
                    .attr(aria::LABELLED_BY, format!("tab-{n}"))
                    .child(Markup::text(format!("Content {n}")))
            }))
            .mount(doc, body)?;

        let tabs = lookup_all(page, "tab", count)?;
        let panels = lookup_all(page, "tabpanel", count)?;
        let handle = Tabs::attach(page, root)?;
        Ok(TabsFixture {
            handle,
            root,
            tabs,
            panels,
        })
    }

    /// Actions menu with three items.
    pub fn dropdown(page: &mut Page) -> WidgetResult<DropdownFixture> {
        let doc = page.document_mut();
        let body = doc.body();
        let root = Markup::container()
            .id("actions")
            .child(
                Markup::button("Actions")
                    .id("actions-trigger")
                    .attr(aria::HAS_POPUP, "menu")
                    .attr(aria::EXPANDED, "false")
                    .attr(aria::CONTROLS, "actions-menu"),
            )
            .child(
                Markup::container()
                    .id("actions-menu")
                    .attr(aria::ROLE, "menu")
                    .hidden()
                    .children(["Rename", "Duplicate", "Delete"].into_iter().enumerate().map(
                        |(i, label)| {
                            Markup::link(label, format!("#{}", label.to_lowercase()))
                                .id(format!("actions-item-{}", i + 1))
                                .attr(aria::ROLE, "menuitem")
                        },
                    )),
            )
            .mount(doc, body)?;

        let trigger = lookup(page, "actions-trigger")?;
        let menu = lookup(page, "actions-menu")?;
        let items = lookup_all(page, "actions-item", 3)?;
        let handle = Dropdown::attach(page, root)?;
        Ok(DropdownFixture {
            handle,
            root,
            trigger,
            menu,
            items,
        })
    }

    /// Every widget on one page, in reading order: dropdown, accordion,
    /// tabs, then the dialog opener and dialog.
    pub fn gallery(page: &mut Page) -> WidgetResult<Gallery> {
        let body = page.document().body();
        Markup::text("Widget gallery")
            .id("heading")
            .mount(page.document_mut(), body)?;
        Ok(Gallery {
            dropdown: Self::dropdown(page)?,
            accordion: Self::accordion(page, 3)?,
            tabs: Self::tabs(page, 3)?,
            modal: Self::modal(page)?,
        })
    }
}

fn lookup(page: &Page, html_id: &str) -> WidgetResult<ElementId> {
    // Markup just mounted, so a miss means a typo in the fixture itself.
    page.document()
        .element_by_id(html_id)
        .ok_or(a11y_widgets::WidgetError::MissingMarker {
            controller: "fixture",
            root: page.document().body(),
            marker: "id",
        })
}

fn lookup_all(page: &Page, prefix: &str, count: usize) -> WidgetResult<Vec<ElementId>> {
    (1..=count)
        .map(|n| lookup(page, &format!("{prefix}-{n}")))
        .collect()
}
