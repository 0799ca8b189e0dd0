//! Notification system for the TUI.

use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;

const MAX_NOTIFICATIONS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
    Success,
}

impl NotificationLevel {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "INFO",
            NotificationLevel::Warning => "WARN",
            NotificationLevel::Error => "ERROR",
            NotificationLevel::Success => "OK",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// Bounded notification history; the footer shows the newest entry until it
/// expires.
#[derive(Debug, Default)]
pub struct Notifications {
    entries: VecDeque<Notification>,
}

impl Notifications {
    pub fn push(&mut self, notification: Notification) {
        if self.entries.len() == MAX_NOTIFICATIONS {
            self.entries.pop_front();
        }
        self.entries.push_back(notification);
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop entries older than `ttl`. Errors stay until dismissed.
    pub fn expire(&mut self, now: DateTime<Utc>, ttl: Duration) {
        self.entries.retain(|note| {
            note.level == NotificationLevel::Error || now - note.created_at < ttl
        });
    }

    pub fn dismiss_latest(&mut self) -> Option<Notification> {
        self.entries.pop_back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_bounded() {
        let mut notes = Notifications::default();
        for idx in 0..(MAX_NOTIFICATIONS + 5) {
            notes.push(Notification::new(NotificationLevel::Info, format!("n{}", idx)));
        }
        assert_eq!(notes.len(), MAX_NOTIFICATIONS);
        assert_eq!(
            notes.latest().map(|n| n.message.as_str()),
            Some(format!("n{}", MAX_NOTIFICATIONS + 4).as_str())
        );
    }

    #[test]
    fn errors_survive_expiry() {
        let mut notes = Notifications::default();
        notes.push(Notification::new(NotificationLevel::Error, "boom"));
        notes.push(Notification::new(NotificationLevel::Success, "done"));
        notes.expire(Utc::now() + Duration::minutes(5), Duration::seconds(5));
        assert_eq!(notes.len(), 1);
        assert_eq!(notes.latest().map(|n| n.level), Some(NotificationLevel::Error));
    }
}
