//! Conversation entity - ordered, append-only transcript.

use super::limit::TurnLimit;
use super::message::Message;

/// An ordered, append-only sequence of messages.
///
/// A conversation lives exactly as long as the chat panel that owns it.
/// There is no reset: a fresh panel starts a fresh conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Creates an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a conversation from an existing transcript, preserving order.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Appends a message at the end of the transcript.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Returns all messages in conversation order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of turns.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if nothing has been said yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the last message if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Returns the count of user messages.
    pub fn user_message_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_user()).count()
    }

    /// Returns true if `limit` still admits another user turn.
    pub fn accepts_turn(&self, limit: &TurnLimit) -> bool {
        limit.allows_another(self.len())
    }
}
