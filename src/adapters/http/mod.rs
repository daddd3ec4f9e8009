//! HTTP adapters - the public endpoints.
//!
//! Each endpoint has its own module with DTOs, handlers and routes;
//! [`app_router`] assembles them behind the shared middleware.

pub mod chat;
pub mod contact;
pub mod health;
mod router;

pub use chat::{chat_router, ChatAppState};
pub use contact::{contact_router, ContactAppState};
pub use health::health_router;
pub use router::app_router;
