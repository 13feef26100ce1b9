//! Input simulation for testing.

use crate::{TestError, TestResult};
use a11y_widgets::{ElementId, Page};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One scripted interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Key press at the active element.
    Key(KeyEvent),
    /// Pointer press on the element with this `id` attribute.
    ClickId(String),
    /// Pointer press on a known element.
    Click(ElementId),
}

/// A sequence of input steps for testing.
#[derive(Debug, Clone, Default)]
pub struct InputSequence {
    steps: Vec<Step>,
}

impl InputSequence {
    /// Create a new empty input sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key event.
    pub fn key(&mut self, key: KeyCode) -> &mut Self {
        self.key_mod(key, KeyModifiers::NONE)
    }

    /// Add a key event with modifiers.
    pub fn key_mod(&mut self, key: KeyCode, modifiers: KeyModifiers) -> &mut Self {
        self.steps.push(Step::Key(KeyEvent::new(key, modifiers)));
        self
    }

    /// Add a character key event.
    pub fn char(&mut self, c: char) -> &mut Self {
        self.key(KeyCode::Char(c))
    }

    /// Add an Enter key event.
    pub fn enter(&mut self) -> &mut Self {
        self.key(KeyCode::Enter)
    }

    /// Add a Space key event.
    pub fn space(&mut self) -> &mut Self {
        self.key(KeyCode::Char(' '))
    }

    /// Add an Escape key event.
    pub fn esc(&mut self) -> &mut Self {
        self.key(KeyCode::Esc)
    }

    /// Add a Tab key event.
    pub fn tab(&mut self) -> &mut Self {
        self.key(KeyCode::Tab)
    }

    /// Add a Shift+Tab key event, as terminals report it.
    pub fn shift_tab(&mut self) -> &mut Self {
        self.key_mod(KeyCode::BackTab, KeyModifiers::SHIFT)
    }

    pub fn left(&mut self) -> &mut Self {
        self.key(KeyCode::Left)
    }

    pub fn right(&mut self) -> &mut Self {
        self.key(KeyCode::Right)
    }

    pub fn home(&mut self) -> &mut Self {
        self.key(KeyCode::Home)
    }

    pub fn end(&mut self) -> &mut Self {
        self.key(KeyCode::End)
    }

    /// Add a pointer press on the element with the given `id` attribute.
    pub fn click(&mut self, id: impl Into<String>) -> &mut Self {
        self.steps.push(Step::ClickId(id.into()));
        self
    }

    /// Add a pointer press on a known element.
    pub fn click_element(&mut self, id: ElementId) -> &mut Self {
        self.steps.push(Step::Click(id));
        self
    }

    /// The scripted steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Get all key events.
    pub fn key_events(&self) -> Vec<KeyEvent> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                Step::Key(e) => Some(*e),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Append another sequence.
    pub fn append(&mut self, other: &InputSequence) -> &mut Self {
        self.steps.extend(other.steps.iter().cloned());
        self
    }

    /// Repeat the current sequence so it occurs n times in total.
    pub fn repeat(&mut self, n: usize) -> &mut Self {
        let steps = self.steps.clone();
        for _ in 1..n {
            self.steps.extend(steps.iter().cloned());
        }
        self
    }

    /// Feed every step to the page in order.
    ///
    /// Stops at the first click whose target cannot be resolved; steps
    /// before it have already been applied.
    pub fn replay(&self, page: &mut Page) -> TestResult<()> {
        for step in &self.steps {
            match step {
                Step::Key(key) => page.press_key(*key),
                Step::ClickId(id) => {
                    let target = page
                        .document()
                        .element_by_id(id)
                        .ok_or_else(|| TestError::NoSuchId(id.clone()))?;
                    page.click(target);
                }
                Step::Click(target) => {
                    if !page.document().contains(*target) {
                        return Err(TestError::Detached(*target));
                    }
                    page.click(*target);
                }
            }
        }
        Ok(())
    }
}

/// Builder for creating common input patterns.
pub struct InputPatterns;

impl InputPatterns {
    /// Press Tab n times.
    pub fn tab_times(n: usize) -> InputSequence {
        let mut seq = InputSequence::new();
        for _ in 0..n {
            seq.tab();
        }
        seq
    }

    /// Press Shift+Tab n times.
    pub fn shift_tab_times(n: usize) -> InputSequence {
        let mut seq = InputSequence::new();
        for _ in 0..n {
            seq.shift_tab();
        }
        seq
    }

    /// Click an opener, then dismiss with Escape.
    pub fn open_and_dismiss(opener_id: &str) -> InputSequence {
        let mut seq = InputSequence::new();
        seq.click(opener_id).esc();
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11y_widgets::Markup;

    fn page_with_buttons() -> Page {
        let mut page = Page::new();
        let doc = page.document_mut();
        let body = doc.body();
        Markup::button("One").id("one").mount(doc, body).unwrap();
        Markup::button("Two").id("two").mount(doc, body).unwrap();
        page
    }

    #[test]
    fn test_builder_chains() {
        let mut seq = InputSequence::new();
        seq.tab().tab().enter().click("x");
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.key_events().len(), 3);
    }

    #[test]
    fn test_shift_tab_reports_backtab() {
        let mut seq = InputSequence::new();
        seq.shift_tab();
        let events = seq.key_events();
        assert_eq!(events[0].code, KeyCode::BackTab);
        assert!(events[0].modifiers.contains(KeyModifiers::SHIFT));
    }

    #[test]
    fn test_replay_moves_focus() {
        let mut page = page_with_buttons();
        InputPatterns::tab_times(2).replay(&mut page).unwrap();
        let two = page.document().element_by_id("two");
        assert_eq!(page.document().focused(), two);

        InputPatterns::shift_tab_times(1).replay(&mut page).unwrap();
        let one = page.document().element_by_id("one");
        assert_eq!(page.document().focused(), one);
    }

    #[test]
    fn test_replay_click_by_id() {
        let mut page = page_with_buttons();
        let mut seq = InputSequence::new();
        seq.click("two");
        seq.replay(&mut page).unwrap();
        assert_eq!(page.document().focused(), page.document().element_by_id("two"));
    }

    #[test]
    fn test_replay_unknown_id() {
        let mut page = page_with_buttons();
        let mut seq = InputSequence::new();
        seq.tab().click("missing").tab();

        let err = seq.replay(&mut page).unwrap_err();
        assert!(matches!(err, TestError::NoSuchId(ref id) if id == "missing"));
        // The first Tab was applied, the last was not.
        assert_eq!(page.document().focused(), page.document().element_by_id("one"));
    }

    #[test]
    fn test_replay_detached_element() {
        let mut page = page_with_buttons();
        let two = page.document().element_by_id("two").unwrap();
        page.remove_element(two);

        let mut seq = InputSequence::new();
        seq.click_element(two);
        assert!(matches!(seq.replay(&mut page), Err(TestError::Detached(_))));
    }

    #[test]
    fn test_repeat_and_append() {
        let mut seq = InputSequence::new();
        seq.right().repeat(3);
        assert_eq!(seq.len(), 3);

        let mut other = InputSequence::new();
        other.home().end();
        seq.append(&other);
        assert_eq!(seq.len(), 5);
        assert!(!seq.is_empty());
    }
}
