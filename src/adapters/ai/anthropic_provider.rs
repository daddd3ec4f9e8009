//! Anthropic Provider - Implementation of AIProvider for Anthropic's Messages API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicConfig::new(api_key)
//!     .with_model("claude-sonnet-4-5-20250929")
//!     .with_base_url("https://api.anthropic.com");
//!
//! let provider = AnthropicProvider::new(config)?;
//! ```
//!
//! Content blocks are kept typed: `text` blocks become [`ContentBlock::Text`],
//! everything else (tool use, thinking, ...) becomes [`ContentBlock::Other`].

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, ContentBlock, FinishReason,
    ProviderInfo, TokenUsage,
};

/// Configuration for the Anthropic provider.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "claude-sonnet-4-5-20250929").
    pub model: String,
    /// Base URL for the API (default: https://api.anthropic.com).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl AnthropicConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "claude-sonnet-4-5-20250929".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(120),
            max_retries: 2,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Used when the request does not set `max_tokens`; the API requires one.
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Backoff stops doubling after this many retries (64 s).
const MAX_BACKOFF_EXPONENT: u32 = 6;

/// Anthropic API provider implementation.
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    /// Creates a new Anthropic provider with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `AIError::InvalidRequest` if the HTTP client cannot be built.
    pub fn new(config: AnthropicConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the messages endpoint URL.
    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    /// Converts our request to Anthropic's format.
    ///
    /// Only `role` and `content` of each message are forwarded, in order.
    fn to_anthropic_request(&self, request: &CompletionRequest) -> AnthropicRequest {
        let messages = request
            .messages
            .iter()
            .map(|msg| AnthropicMessage {
                role: msg.role().as_str().to_string(),
                content: msg.content().to_string(),
            })
            .collect();

        AnthropicRequest {
            model: self.config.model.clone(),
            messages,
            system: request.system_prompt.clone(),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: request.temperature,
        }
    }

    /// Sends a request and handles transport failures.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let anthropic_request = self.to_anthropic_request(request);

        self.client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&anthropic_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(Self::error_for_status(status.as_u16(), error_body))
    }

    /// Maps a non-success status and body to an `AIError`.
    fn error_for_status(status: u16, error_body: String) -> AIError {
        match status {
            401 | 403 => AIError::AuthenticationFailed,
            429 => AIError::rate_limited(Self::parse_retry_after(&error_body)),
            400 => {
                if error_body.contains("prompt is too long") {
                    AIError::ContextTooLong
                } else {
                    AIError::InvalidRequest(error_body)
                }
            }
            500..=599 => AIError::unavailable(format!("Server error {}: {}", status, error_body)),
            _ => AIError::network(format!("Unexpected status {}: {}", status, error_body)),
        }
    }

    /// Delay before retry number `retry_count + 1`: 1s, 2s, 4s, ... capped.
    fn backoff_delay(retry_count: u32) -> Duration {
        Duration::from_secs(1u64 << retry_count.min(MAX_BACKOFF_EXPONENT))
    }

    /// Parses retry-after from error response.
    fn parse_retry_after(error_body: &str) -> u32 {
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
            if let Some(s) = parsed
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
            {
                if let Some(idx) = s.find("try again in ") {
                    let rest = &s[idx + 13..];
                    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                    if let Ok(secs) = digits.parse::<u32>() {
                        return secs;
                    }
                }
            }
        }
        60
    }

    /// Parses a successful response body.
    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = self.handle_response_status(response).await?;

        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        Ok(anthropic_response.into_completion())
    }
}

#[async_trait]
impl AIProvider for AnthropicProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let mut retry_count = 0;

        loop {
            let result = match self.send_request(&request).await {
                Ok(response) => self.parse_response(response).await,
                Err(err) => Err(err),
            };

            match result {
                Ok(completion) => return Ok(completion),
                Err(err) if !err.is_retryable() || retry_count >= self.config.max_retries => {
                    return Err(err);
                }
                Err(err) => {
                    tracing::warn!(
                        trace_id = %request.trace_id,
                        attempt = retry_count + 1,
                        "Anthropic request failed, retrying: {}",
                        err
                    );
                }
            }

            sleep(Self::backoff_delay(retry_count)).await;
            retry_count += 1;
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("anthropic", &self.config.model)
    }
}

// ----- Anthropic API Types -----

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    model: String,
    content: Vec<AnthropicContentBlock>,
    stop_reason: Option<String>,
    usage: AnthropicUsage,
}

impl AnthropicResponse {
    fn into_completion(self) -> CompletionResponse {
        let content = self
            .content
            .into_iter()
            .map(|block| match (block.block_type.as_str(), block.text) {
                ("text", Some(text)) => ContentBlock::text(text),
                (kind, _) => ContentBlock::other(kind),
            })
            .collect();

        let finish_reason = match self.stop_reason.as_deref() {
            Some("max_tokens") => FinishReason::Length,
            Some("tool_use") => FinishReason::ToolUse,
            _ => FinishReason::Stop,
        };

        CompletionResponse {
            content,
            usage: TokenUsage::new(self.usage.input_tokens, self.usage.output_tokens),
            model: self.model,
            finish_reason,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::Message;

    fn provider() -> AnthropicProvider {
        AnthropicProvider::new(AnthropicConfig::new("test-key")).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = AnthropicConfig::new("test-key")
            .with_model("claude-3-haiku-20240307")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(30))
            .with_max_retries(5);

        assert_eq!(config.model, "claude-3-haiku-20240307");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = AnthropicConfig::new("sk-ant-very-secret");
        assert!(!format!("{:?}", config).contains("sk-ant-very-secret"));
    }

    #[test]
    fn messages_url_tolerates_trailing_slash() {
        let provider =
            AnthropicProvider::new(AnthropicConfig::new("k").with_base_url("http://localhost:9/"))
                .unwrap();
        assert_eq!(provider.messages_url(), "http://localhost:9/v1/messages");
    }

    #[test]
    fn request_carries_system_prompt_and_sampling() {
        let request = CompletionRequest::new("trace")
            .with_messages(vec![
                Message::user("Where did Alex study?").unwrap(),
                Message::assistant("At a university.").unwrap(),
                Message::user("Which one?").unwrap(),
            ])
            .with_system_prompt("You are Alex's assistant.")
            .with_max_tokens(10_000)
            .with_temperature(0.7);

        let body = serde_json::to_value(provider().to_anthropic_request(&request)).unwrap();

        assert_eq!(body["model"], "claude-sonnet-4-5-20250929");
        assert_eq!(body["system"], "You are Alex's assistant.");
        assert_eq!(body["max_tokens"], 10_000);
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(
            body["messages"],
            serde_json::json!([
                {"role": "user", "content": "Where did Alex study?"},
                {"role": "assistant", "content": "At a university."},
                {"role": "user", "content": "Which one?"},
            ])
        );
    }

    #[test]
    fn request_omits_unset_optionals() {
        let request = CompletionRequest::new("trace").with_message(Message::user("Hi").unwrap());
        let body = serde_json::to_value(provider().to_anthropic_request(&request)).unwrap();

        assert!(body.get("system").is_none());
        assert!(body.get("temperature").is_none());
        assert_eq!(body["max_tokens"], 4096);
    }

    #[test]
    fn response_keeps_block_types() {
        let raw = r#"{
            "model": "claude-sonnet-4-5-20250929",
            "content": [
                {"type": "tool_use", "id": "t1", "name": "lookup", "input": {}},
                {"type": "text", "text": "Alex loves Rust."}
            ],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 12, "output_tokens": 5}
        }"#;
        let parsed: AnthropicResponse = serde_json::from_str(raw).unwrap();
        let completion = parsed.into_completion();

        assert_eq!(
            completion.content,
            vec![ContentBlock::other("tool_use"), ContentBlock::text("Alex loves Rust.")]
        );
        assert_eq!(completion.first_text(), Some("Alex loves Rust."));
        assert_eq!(completion.usage.total_tokens, 17);
        assert_eq!(completion.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn response_max_tokens_maps_to_length() {
        let raw = r#"{
            "model": "m",
            "content": [{"type": "text", "text": "cut"}],
            "stop_reason": "max_tokens",
            "usage": {"input_tokens": 1, "output_tokens": 1}
        }"#;
        let parsed: AnthropicResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.into_completion().finish_reason, FinishReason::Length);
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            AnthropicProvider::error_for_status(401, String::new()),
            AIError::AuthenticationFailed
        );
        assert_eq!(
            AnthropicProvider::error_for_status(429, String::new()),
            AIError::rate_limited(60)
        );
        assert_eq!(
            AnthropicProvider::error_for_status(400, "prompt is too long: 250000 tokens".into()),
            AIError::ContextTooLong
        );
        assert!(matches!(
            AnthropicProvider::error_for_status(400, "bad".into()),
            AIError::InvalidRequest(_)
        ));
        assert!(matches!(
            AnthropicProvider::error_for_status(529, "overloaded".into()),
            AIError::Unavailable { .. }
        ));
        assert!(matches!(
            AnthropicProvider::error_for_status(418, String::new()),
            AIError::Network(_)
        ));
    }

    #[test]
    fn parse_retry_after_reads_message() {
        let error = r#"{"error":{"message":"Rate limit exceeded, try again in 12s"}}"#;
        assert_eq!(AnthropicProvider::parse_retry_after(error), 12);
    }

    #[test]
    fn backoff_doubles_then_caps() {
        assert_eq!(AnthropicProvider::backoff_delay(0), Duration::from_secs(1));
        assert_eq!(AnthropicProvider::backoff_delay(1), Duration::from_secs(2));
        assert_eq!(AnthropicProvider::backoff_delay(6), Duration::from_secs(64));
        assert_eq!(AnthropicProvider::backoff_delay(64), Duration::from_secs(64));
        assert_eq!(AnthropicProvider::backoff_delay(u32::MAX), Duration::from_secs(64));
    }

    #[test]
    fn parse_retry_after_default() {
        let error = r#"{"error":{"message":"Rate limit exceeded"}}"#;
        assert_eq!(AnthropicProvider::parse_retry_after(error), 60);
    }

    #[test]
    fn provider_info_reports_model() {
        let info = provider().provider_info();
        assert_eq!(info.name, "anthropic");
        assert_eq!(info.model, "claude-sonnet-4-5-20250929");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_network_error() {
        let config = AnthropicConfig::new("k")
            .with_base_url("http://127.0.0.1:1")
            .with_max_retries(0)
            .with_timeout(Duration::from_secs(2));
        let provider = AnthropicProvider::new(config).unwrap();

        let request = CompletionRequest::new("trace").with_message(Message::user("Hi").unwrap());
        let err = provider.complete(request).await.unwrap_err();

        assert!(err.is_retryable());
    }
}
