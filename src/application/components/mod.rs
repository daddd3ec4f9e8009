//! Client components - explicit, scoped UI state for the chat panel and the
//! contact dialog, plus the HTML view of the chat.

mod chat_view;
mod contact_dialog;
mod conversation_controller;

pub use chat_view::ChatView;
pub use contact_dialog::{ContactDialog, SubmitOutcome};
pub use conversation_controller::{
    ConversationController, InputState, Notice, Rejection, TurnOutcome,
};
