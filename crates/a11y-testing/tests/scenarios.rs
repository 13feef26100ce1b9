//! End-to-end scenarios driven through scripted input.

use a11y_testing::{Fixtures, InputPatterns, InputSequence};
use a11y_widgets::{aria, Markup, Page};

#[test]
fn tabs_activate_second() {
    let mut page = Page::new();
    let tabs = Fixtures::tabs(&mut page, 2).unwrap();

    let mut seq = InputSequence::new();
    seq.click("tab-2");
    seq.replay(&mut page).unwrap();

    let doc = page.document();
    assert_eq!(doc.attr(tabs.tabs[0], aria::SELECTED), Some("false"));
    assert!(doc.is_hidden(tabs.panels[0]));
    assert_eq!(doc.attr(tabs.tabs[1], aria::SELECTED), Some("true"));
    assert!(!doc.is_hidden(tabs.panels[1]));
    assert_eq!(doc.focused(), Some(tabs.tabs[1]));
}

#[test]
fn tabs_keyboard_walk() {
    let mut page = Page::new();
    let tabs = Fixtures::tabs(&mut page, 3).unwrap();

    // Only the selected tab is in the Tab sequence.
    InputPatterns::tab_times(1).replay(&mut page).unwrap();
    assert_eq!(page.document().focused(), Some(tabs.tabs[0]));

    let mut seq = InputSequence::new();
    seq.right().right().right();
    seq.replay(&mut page).unwrap();
    assert_eq!(page.document().focused(), Some(tabs.tabs[0]));

    let mut seq = InputSequence::new();
    seq.end();
    seq.replay(&mut page).unwrap();
    assert_eq!(page.document().attr(tabs.tabs[2], aria::SELECTED), Some("true"));

    let mut seq = InputSequence::new();
    seq.left().home();
    seq.replay(&mut page).unwrap();
    assert_eq!(page.document().focused(), Some(tabs.tabs[0]));
    assert!(!page.document().is_hidden(tabs.panels[0]));
}

#[test]
fn accordion_activate_twice() {
    let mut page = Page::new();
    let accordion = Fixtures::accordion(&mut page, 1).unwrap();
    let (toggle, panel) = (accordion.toggles[0], accordion.panels[0]);

    let mut seq = InputSequence::new();
    seq.click("faq-toggle-1");
    seq.replay(&mut page).unwrap();
    assert_eq!(page.document().attr(toggle, aria::EXPANDED), Some("true"));
    assert!(!page.document().is_hidden(panel));

    seq.replay(&mut page).unwrap();
    assert_eq!(page.document().attr(toggle, aria::EXPANDED), Some("false"));
    assert!(page.document().is_hidden(panel));
}

#[test]
fn accordion_keyboard_then_link_reachable() {
    let mut page = Page::new();
    let accordion = Fixtures::accordion(&mut page, 2).unwrap();

    let mut seq = InputSequence::new();
    seq.tab().enter().tab();
    seq.replay(&mut page).unwrap();

    // The expanded panel's link now sits between the two toggles.
    let link = page.document().query(accordion.panels[0], |el| el.attr("href").is_some())[0];
    assert_eq!(page.document().focused(), Some(link));
}

#[test]
fn modal_open_trap_and_dismiss() {
    let mut page = Page::new();
    let modal = Fixtures::modal(&mut page).unwrap();

    let mut seq = InputSequence::new();
    seq.tab().enter();
    seq.replay(&mut page).unwrap();
    assert!(!page.document().is_hidden(modal.dialog));
    assert_eq!(page.document().focused(), Some(modal.first));

    InputPatterns::shift_tab_times(1).replay(&mut page).unwrap();
    assert_eq!(page.document().focused(), Some(modal.last));
    InputPatterns::tab_times(1).replay(&mut page).unwrap();
    assert_eq!(page.document().focused(), Some(modal.first));

    let mut seq = InputSequence::new();
    seq.esc();
    seq.replay(&mut page).unwrap();
    assert!(page.document().is_hidden(modal.dialog));
    assert_eq!(page.document().attr(modal.dialog, aria::ARIA_HIDDEN), Some("true"));
    assert_eq!(page.document().focused(), Some(modal.opener));
}

#[test]
fn modal_dismiss_control_matches_dismiss_key() {
    let mut page = Page::new();
    let modal = Fixtures::modal(&mut page).unwrap();

    InputPatterns::open_and_dismiss("open-settings")
        .replay(&mut page)
        .unwrap();
    let after_key = (page.document().is_hidden(modal.dialog), page.document().focused());

    let mut seq = InputSequence::new();
    seq.click("open-settings").click("settings-cancel");
    seq.replay(&mut page).unwrap();
    let after_click = (page.document().is_hidden(modal.dialog), page.document().focused());

    assert_eq!(after_key, (true, Some(modal.opener)));
    assert_eq!(after_key, after_click);
}

#[test]
fn modal_opener_removed_while_open() {
    let mut page = Page::new();
    let modal = Fixtures::modal(&mut page).unwrap();

    let mut seq = InputSequence::new();
    seq.click("open-settings");
    seq.replay(&mut page).unwrap();
    page.remove_element(modal.opener);

    let mut seq = InputSequence::new();
    seq.esc();
    seq.replay(&mut page).unwrap();
    assert!(page.document().is_hidden(modal.dialog));
    assert_eq!(page.document().focused(), None);
}

#[test]
fn dropdown_toggle_and_outside_press() {
    let mut page = Page::new();
    let dropdown = Fixtures::dropdown(&mut page).unwrap();
    let body = page.document().body();
    Markup::text("Footer").id("footer").mount(page.document_mut(), body).unwrap();

    let mut seq = InputSequence::new();
    seq.click("actions-trigger").click("actions-trigger");
    seq.replay(&mut page).unwrap();
    assert_eq!(page.document().attr(dropdown.trigger, aria::EXPANDED), Some("false"));

    let mut seq = InputSequence::new();
    seq.click("actions-trigger").click("actions-item-2");
    seq.replay(&mut page).unwrap();
    assert!(!page.document().is_hidden(dropdown.menu));

    let mut seq = InputSequence::new();
    seq.click("footer");
    seq.replay(&mut page).unwrap();
    assert!(page.document().is_hidden(dropdown.menu));
    assert_eq!(page.document().attr(dropdown.trigger, aria::EXPANDED), Some("false"));
}

#[test]
fn dropdown_removed_root_stops_listening() {
    let mut page = Page::new();
    let dropdown = Fixtures::dropdown(&mut page).unwrap();
    let before = page.listener_count();

    page.remove_element(dropdown.root);
    assert!(!page.is_attached(dropdown.handle.id()));
    assert_eq!(page.listener_count(), before - 2);
}
