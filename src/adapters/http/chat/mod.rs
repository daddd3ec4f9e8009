//! HTTP adapter for the chat proxy.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ChatRequest, ChatResponse, ErrorBody, MessageDto};
pub use handlers::{ChatApiError, ChatAppState};
pub use routes::{chat_router, chat_routes};
