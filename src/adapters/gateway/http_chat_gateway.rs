//! HTTP chat gateway - the conversation controller's link to `POST /api/chat`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::conversation::Message;
use crate::ports::{ChatGateway, GatewayError};

/// Default bound on one chat round trip.
pub const DEFAULT_CHAT_TIMEOUT: Duration = Duration::from_secs(90);

/// Sends the full transcript to the chat proxy over HTTP.
pub struct HttpChatGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpChatGateway {
    /// Creates a gateway for the proxy at `base_url` with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        Self::with_timeout(base_url, DEFAULT_CHAT_TIMEOUT)
    }

    /// Creates a gateway with an explicit round-trip timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct ChatPayload<'a> {
    messages: &'a [Message],
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    response: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorReply {
    pub(crate) error: String,
}

/// Reads a non-2xx body, preferring the `{"error": ...}` text.
pub(crate) async fn status_error(response: reqwest::Response) -> GatewayError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorReply>(&body)
        .map(|reply| reply.error)
        .unwrap_or(body);
    GatewayError::status(status, message)
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    async fn send(&self, messages: &[Message]) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(self.chat_url())
            .json(&ChatPayload { messages })
            .send()
            .await
            .map_err(|e| GatewayError::transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| GatewayError::malformed(e.to_string()))?;

        Ok(reply.response)
    }
}
