//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Language model providers (Anthropic, mock)
//! - `email` - Mail delivery (Resend, SMTP, mock)
//! - `formatter` - Markdown rendering for assistant replies
//! - `gateway` - Client-side HTTP links to this service
//! - `http` - Axum endpoints

pub mod ai;
pub mod email;
pub mod formatter;
pub mod gateway;
pub mod http;
