//! Gateway Adapters.
//!
//! HTTP implementations of the client-side ports that reach this service.

mod http_chat_gateway;
mod http_contact_gateway;

pub use http_chat_gateway::{HttpChatGateway, DEFAULT_CHAT_TIMEOUT};
pub use http_contact_gateway::HttpContactGateway;
