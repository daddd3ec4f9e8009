//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Server-side Ports
//!
//! - `AIProvider` - Language model completions for the chat proxy
//! - `Mailer` - Transactional email for the contact relay
//!
//! ## Client-side Ports
//!
//! - `ChatGateway` - Conversation controller to chat proxy
//! - `ContactGateway` - Contact dialog to contact relay
//! - `MessageFormatter` - Safe rich rendering of assistant replies

mod ai_provider;
mod chat_gateway;
mod contact_gateway;
mod mailer;
mod message_formatter;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, ContentBlock, FinishReason,
    ProviderInfo, TokenUsage,
};
pub use chat_gateway::{ChatGateway, GatewayError};
pub use contact_gateway::ContactGateway;
pub use mailer::{Email, MailError, Mailer};
pub use message_formatter::MessageFormatter;
