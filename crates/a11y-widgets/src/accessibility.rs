//! Status announcements for assistive technology.
//!
//! Controllers describe every state change in words ("Settings dialog
//! opened", "Overview tab, 2 of 3"). The host polls the buffer and hands
//! the messages to a live region, status line or speech engine.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// The `[accessibility]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibilityConfig {
    pub status_announcements: bool,
}

impl Default for AccessibilityConfig {
    fn default() -> Self {
        Self {
            status_announcements: true,
        }
    }
}

impl AccessibilityConfig {
    /// Widgets still update their markers but say nothing.
    pub fn silent() -> Self {
        Self {
            status_announcements: false,
        }
    }
}

/// How urgently a message should reach the user.
///
/// `High` maps to an assertive live region and interrupts whatever is
/// being read; the rest are polite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnnouncementPriority {
    Low,
    Normal,
    High,
}

impl AnnouncementPriority {
    const LEVELS: usize = 3;

    fn slot(self) -> usize {
        self as usize
    }

    /// The `aria-live` value a web host would use.
    pub fn politeness(self) -> &'static str {
        match self {
            AnnouncementPriority::High => "assertive",
            AnnouncementPriority::Normal | AnnouncementPriority::Low => "polite",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub message: String,
    pub priority: AnnouncementPriority,
    /// Set for `High`: cut off the current message instead of queueing.
    pub interrupt: bool,
}

/// Pending announcements, read back highest priority first and in
/// arrival order within a priority.
///
/// The buffer is bounded so a host that never polls does not grow it
/// forever. When full, the oldest message of the lowest queued priority
/// makes room, unless the new message ranks below all of them, in which
/// case the new one is dropped.
#[derive(Debug)]
pub struct AnnouncementBuffer {
    // Indexed by `AnnouncementPriority::slot`.
    queues: [VecDeque<Announcement>; AnnouncementPriority::LEVELS],
    limit: usize,
}

impl Default for AnnouncementBuffer {
    fn default() -> Self {
        Self::with_limit(Self::DEFAULT_LIMIT)
    }
}

impl AnnouncementBuffer {
    pub const DEFAULT_LIMIT: usize = 64;

    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding at most `limit` messages.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            queues: Default::default(),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn announce(&mut self, message: impl Into<String>, priority: AnnouncementPriority) {
        if self.len() >= self.limit && !self.make_room(priority) {
            tracing::debug!(?priority, "announcement buffer full, message dropped");
            return;
        }
        self.queues[priority.slot()].push_back(Announcement {
            message: message.into(),
            priority,
            interrupt: priority == AnnouncementPriority::High,
        });
    }

    fn make_room(&mut self, incoming: AnnouncementPriority) -> bool {
        match self.queues.iter().position(|q| !q.is_empty()) {
            Some(slot) if slot <= incoming.slot() => self.queues[slot].pop_front().is_some(),
            _ => false,
        }
    }

    /// Take the message that should be read now.
    pub fn next(&mut self) -> Option<Announcement> {
        self.queues.iter_mut().rev().find_map(VecDeque::pop_front)
    }

    pub fn has_pending(&self) -> bool {
        !self.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queues.iter().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.iter().all(VecDeque::is_empty)
    }

    pub fn clear(&mut self) {
        self.queues.iter_mut().for_each(VecDeque::clear);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_message_jumps_the_queue() {
        let mut buffer = AnnouncementBuffer::new();
        buffer.announce("Question 1 expanded", AnnouncementPriority::Normal);
        buffer.announce("Details tab, 2 of 3", AnnouncementPriority::Normal);
        buffer.announce("Settings dialog opened", AnnouncementPriority::High);
        assert_eq!(buffer.len(), 3);

        let first = buffer.next().unwrap();
        assert_eq!(first.message, "Settings dialog opened");
        assert!(first.interrupt);
        assert_eq!(first.priority.politeness(), "assertive");

        let second = buffer.next().unwrap();
        assert_eq!(second.message, "Question 1 expanded");
        assert!(!second.interrupt);
        assert_eq!(buffer.next().unwrap().message, "Details tab, 2 of 3");
        assert!(buffer.next().is_none());
    }

    #[test]
    fn test_low_priority_waits() {
        let mut buffer = AnnouncementBuffer::new();
        buffer.announce("hint", AnnouncementPriority::Low);
        buffer.announce("Menu expanded", AnnouncementPriority::Normal);

        assert_eq!(buffer.next().unwrap().message, "Menu expanded");
        assert!(buffer.has_pending());
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
    }

    #[test]
    fn test_unpolled_buffer_stays_bounded() {
        let mut buffer = AnnouncementBuffer::with_limit(3);
        for i in 0..10 {
            buffer.announce(format!("Question {i} expanded"), AnnouncementPriority::Normal);
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.next().unwrap().message, "Question 7 expanded");

        // A message ranked below everything queued is the one dropped.
        buffer.announce("Settings dialog opened", AnnouncementPriority::High);
        buffer.announce("hint", AnnouncementPriority::Low);
        assert_eq!(buffer.len(), 3);
        let messages: Vec<_> = std::iter::from_fn(|| buffer.next()).map(|a| a.message).collect();
        assert_eq!(
            messages,
            vec!["Settings dialog opened", "Question 8 expanded", "Question 9 expanded"]
        );
    }

    #[test]
    fn test_config_section() {
        assert!(AccessibilityConfig::default().status_announcements);
        assert!(!AccessibilityConfig::silent().status_announcements);

        let parsed: AccessibilityConfig = toml::from_str("").unwrap();
        assert_eq!(parsed, AccessibilityConfig::default());
    }
}
