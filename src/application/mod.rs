//! Application layer - Handlers and client components.
//!
//! Handlers orchestrate ports for the server endpoints. Components hold the
//! browser-side state of the chat panel and the contact dialog.

pub mod components;
pub mod handlers;

pub use components::{ChatView, ContactDialog, ConversationController};
pub use handlers::{RelayChatHandler, SendContactHandler};
