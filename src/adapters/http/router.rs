//! Application router - every endpoint plus the shared tower-http layers.

use axum::Router;
use http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::chat::{chat_router, ChatAppState};
use super::contact::{contact_router, ContactAppState};
use super::health::health_router;

/// Builds the full router:
///
/// - POST /api/chat
/// - POST /api/contact
/// - GET /health
pub fn app_router(chat: ChatAppState, contact: ContactAppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(chat_router().with_state(chat))
        .merge(contact_router().with_state(contact))
        .merge(health_router())
        .layer(cors_layer(server))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
}

/// Configured origins win; otherwise permissive in development and
/// same-origin only in production.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if !origins.is_empty() {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    } else if server.is_production() {
        CorsLayer::new()
    } else {
        CorsLayer::permissive()
    }
}
