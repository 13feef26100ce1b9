//! Application state for the widget gallery.

use crate::showcase::{self, Showcase};
use a11y_widgets::{aria, Announcement, ElementId, Page, WidgetConfig};
use crossterm::event::KeyEvent;
use ratatui::layout::{Position, Rect};

/// How many announcements the history pane keeps.
const HISTORY_LIMIT: usize = 50;

/// Main application state.
pub struct App {
    pub page: Page,
    pub showcase: Showcase,
    /// Screen rows of the last frame that map to an element.
    pub hit_areas: Vec<(Rect, ElementId)>,
    /// Most recent announcement, shown in the footer.
    pub status: Option<Announcement>,
    /// Earlier announcements, newest last.
    pub history: Vec<String>,
}

impl App {
    /// Build the gallery page with the user's widget configuration.
    pub fn new() -> anyhow::Result<Self> {
        let config = WidgetConfig::load();
        let mut page = Page::with_config(config)?;
        let showcase = showcase::mount(&mut page)?;
        Ok(Self {
            page,
            showcase,
            hit_areas: Vec::new(),
            status: None,
            history: Vec::new(),
        })
    }

    /// Deliver a key press to the focused element.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.page.press_key(key);
        self.poll_announcements();
    }

    /// Pointer press at a screen cell. Empty space counts as the body.
    pub fn click_at(&mut self, column: u16, row: u16) {
        let position = Position::new(column, row);
        // Later areas are drawn on top (the dialog popup), so search from the end.
        let target = self
            .hit_areas
            .iter()
            .rev()
            .find(|(area, _)| area.contains(position))
            .map(|(_, id)| *id)
            .unwrap_or_else(|| self.page.document().body());
        tracing::debug!(column, row, target = %target, "pointer press");
        self.page.click(target);
        self.poll_announcements();
    }

    /// Whether the preferences dialog is showing.
    pub fn dialog_open(&self) -> bool {
        self.page.document().attr(self.showcase.dialog, aria::ARIA_HIDDEN) == Some("false")
    }

    fn poll_announcements(&mut self) {
        while let Some(announcement) = self.page.next_announcement() {
            self.history.push(announcement.message.clone());
            self.status = Some(announcement);
        }
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }
    }
}
