//! HTTP adapter for the contact relay.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ContactRequest, ContactResponse};
pub use handlers::{ContactApiError, ContactAppState};
pub use routes::{contact_router, contact_routes};
