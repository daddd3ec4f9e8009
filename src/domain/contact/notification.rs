//! Transient on-screen notifications.

use std::time::{Duration, Instant};

/// How long a notification stays on screen.
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(5);

/// Whether the notification reports a success or a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A toast that dismisses itself after [`NOTIFICATION_DURATION`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    kind: NotificationKind,
    message: String,
    shown_at: Instant,
}

impl Notification {
    /// A success toast shown at `now`.
    pub fn success(message: impl Into<String>, now: Instant) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            shown_at: now,
        }
    }

    /// A failure toast shown at `now`.
    pub fn error(message: impl Into<String>, now: Instant) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            shown_at: now,
        }
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }

    /// Returns true while the toast should still be displayed.
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < NOTIFICATION_DURATION
    }
}
