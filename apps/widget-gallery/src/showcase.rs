//! Markup for the gallery page.
//!
//! One of each widget in reading order: a File menu, a help accordion,
//! profile tabs and a preferences dialog with its opener.

use a11y_widgets::{aria, Accordion, Dropdown, ElementId, Markup, Modal, Page, Tabs, WidgetResult};

const QUESTIONS: [(&str, &str); 3] = [
    ("What is a focus trap?", "Tab cycles inside an open dialog until it closes."),
    ("How do I close a dialog?", "Press Escape or use its Cancel button."),
    ("Can I rebind keys?", "Yes, in the [keys] section of config.toml."),
];

const TABS: [(&str, &str); 3] = [
    ("Overview", "Name, avatar and bio."),
    ("Activity", "Nothing new this week."),
    ("Sessions", "Signed in on one terminal."),
];

/// Element handles the renderer needs after mounting.
#[derive(Debug, Clone, Copy)]
pub struct Showcase {
    /// Drawn as a popup rather than inline.
    pub dialog: ElementId,
}

/// Mount every widget into the page body and attach its controller.
pub fn mount(page: &mut Page) -> WidgetResult<Showcase> {
    let doc = page.document_mut();
    let body = doc.body();

    Markup::text("Widget gallery").id("heading").mount(doc, body)?;

    let file = Markup::container()
        .id("file")
        .child(
            Markup::button("File")
                .id("file-trigger")
                .attr(aria::HAS_POPUP, "menu")
                .attr(aria::EXPANDED, "false")
                .attr(aria::CONTROLS, "file-menu"),
        )
        .child(
            Markup::container()
                .id("file-menu")
                .attr(aria::ROLE, "menu")
                .hidden()
                .children(["New", "Open", "Export"].into_iter().enumerate().map(|(i, label)| {
                    Markup::link(label, format!("#{}", label.to_lowercase()))
                        .id(format!("file-item-{}", i + 1))
                        .attr(aria::ROLE, "menuitem")
                })),
        )
        .mount(doc, body)?;

    let help = Markup::container()
        .id("help")
        .children(QUESTIONS.iter().enumerate().flat_map(|(i, (question, answer))| {
            let n = i + 1;
            [
                Markup::button(*question)
                    .id(format!("help-q-{n}"))
                    .attr(aria::EXPANDED, "false")
                    .attr(aria::CONTROLS, format!("help-a-{n}")),
                Markup::container()
                    .id(format!("help-a-{n}"))
                    .hidden()
                    .child(Markup::text(*answer)),
            ]
        }))
        .mount(doc, body)?;

    let profile = Markup::container()
        .id("profile")
        .child(
            Markup::container()
                .attr(aria::ROLE, aria::ROLE_TABLIST)
                .attr("aria-label", "Profile")
                .children(TABS.iter().enumerate().map(|(i, (label, _))| {
                    Markup::button(*label)
                        .id(format!("profile-tab-{}", i + 1))
                        .attr(aria::ROLE, aria::ROLE_TAB)
                        .attr(aria::CONTROLS, format!("profile-panel-{}", i + 1))
                })),
        )
        .children(TABS.iter().enumerate().map(|(i, (_, content))| {
            Markup::container()
                .id(format!("profile-panel-{}", i + 1))
                .attr(aria::ROLE, aria::ROLE_TABPANEL)
                .attr(aria::LABELLED_BY, format!("profile-tab-{}", i + 1))
                .child(Markup::text(*content))
        }))
        .mount(doc, body)?;

    Markup::button("Preferences")
        .id("open-preferences")
        .attr(aria::HAS_POPUP, "dialog")
        .attr(aria::CONTROLS, "preferences")
        .mount(doc, body)?;
    let dialog = Markup::container()
        .id("preferences")
        .attr(aria::ROLE, aria::ROLE_DIALOG)
        .attr(aria::LABELLED_BY, "preferences-title")
        .hidden()
        .child(Markup::text("Preferences").id("preferences-title"))
        .child(Markup::input("theme").id("preferences-theme"))
        .child(Markup::button("Apply").id("preferences-apply"))
        .child(
            Markup::button("Cancel")
                .id("preferences-cancel")
                .flag(aria::DATA_DISMISS),
        )
        .mount(doc, body)?;

    Dropdown::attach(page, file)?;
    Accordion::attach(page, help)?;
    Tabs::attach(page, profile)?;
    Modal::attach(page, dialog)?;
    tracing::debug!(dialog = %dialog, "gallery page mounted");

    Ok(Showcase { dialog })
}
