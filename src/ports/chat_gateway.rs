//! Chat Gateway Port - how the conversation controller reaches the chat proxy.
//!
//! The controller sends the entire transcript on every call; the gateway
//! returns the assistant's reply text or a transport-level failure. Callers
//! never see provider detail, only that the exchange failed.

use async_trait::async_trait;

use crate::domain::conversation::Message;

/// Port for relaying a transcript to the chat proxy.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Sends the full conversation and returns the assistant reply.
    async fn send(&self, messages: &[Message]) -> Result<String, GatewayError>;
}

/// Failures observed by the client side of a proxy round trip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The request never completed (connection, DNS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The proxy answered with a non-2xx status.
    #[error("proxy returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error text from the body, if any.
        message: String,
    },

    /// The proxy answered 2xx but the payload was not understood.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl GatewayError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a status error.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates a malformed response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }
}
