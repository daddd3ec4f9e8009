//! Conversation domain module.
//!
//! The transcript a visitor builds with the assistant, and the turn limit
//! that bounds it.

mod conversation;
mod limit;
mod message;

pub use conversation::Conversation;
pub use limit::{TurnLimit, DEFAULT_MAX_MESSAGES};
pub use message::{Message, Role};
