//! Axum routes for the contact relay.

use axum::routing::post;
use axum::Router;

use super::handlers::{post_contact, ContactAppState};

/// Creates routes for the contact endpoint.
///
/// - POST /contact - Send a contact message
pub fn contact_routes() -> Router<ContactAppState> {
    Router::new().route("/contact", post(post_contact))
}

/// Contact routes under /api.
pub fn contact_router() -> Router<ContactAppState> {
    Router::new().nest("/api", contact_routes())
}
