//! Command handlers for the server endpoints.

pub mod chat;
pub mod contact;

pub use chat::{RelayChatCommand, RelayChatError, RelayChatHandler, RelayChatResult, RelaySettings};
pub use contact::{ContactRouting, SendContactError, SendContactHandler};
