//! Turn limit for a conversation.
//!
//! The limit is never stored as a counter; everything is derived from the
//! transcript length so that the browser-side check and the proxy-side check
//! cannot drift apart.

/// Default number of turns (user + assistant) allowed per conversation.
pub const DEFAULT_MAX_MESSAGES: usize = 20;

/// Maximum number of turns a conversation may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnLimit {
    max_messages: usize,
}

impl TurnLimit {
    /// Creates a limit of `max_messages` turns.
    pub fn new(max_messages: usize) -> Self {
        Self { max_messages }
    }

    /// Returns the configured maximum.
    pub fn max_messages(&self) -> usize {
        self.max_messages
    }

    /// Returns true if a conversation of `len` turns may take another user turn.
    pub fn allows_another(&self, len: usize) -> bool {
        len < self.max_messages
    }

    /// Returns true if a transcript of `len` turns is at or past the limit.
    pub fn is_reached(&self, len: usize) -> bool {
        len >= self.max_messages
    }

    /// Returns true if a transcript of `len` turns exceeds the limit.
    ///
    /// A history sent to the proxy may legitimately contain exactly
    /// `max_messages` turns: the last accepted user turn brings it there.
    pub fn is_exceeded_by(&self, len: usize) -> bool {
        len > self.max_messages
    }

    /// Turns left before the limit.
    pub fn remaining_messages(&self, len: usize) -> usize {
        self.max_messages.saturating_sub(len)
    }

    /// Full question/answer pairs left before the limit.
    pub fn remaining_questions(&self, len: usize) -> usize {
        self.remaining_messages(len) / 2
    }
}

impl Default for TurnLimit {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGES)
    }
}
