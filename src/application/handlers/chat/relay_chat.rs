//! RelayChat command handler.
//!
//! Forwards a visitor's full transcript to the language model under the
//! configured persona and returns the reply text. Holds no per-request state.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::conversation::{Message, TurnLimit};
use crate::ports::{AIError, AIProvider, CompletionRequest, TokenUsage};

/// Command to relay a conversation to the model.
#[derive(Debug, Clone)]
pub struct RelayChatCommand {
    /// The whole transcript, oldest first.
    pub messages: Vec<Message>,
}

impl RelayChatCommand {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

/// Result of a successful relay.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayChatResult {
    /// Text of the reply's leading block.
    pub reply: String,
    /// Model that produced the reply.
    pub model: String,
    /// Token usage for this exchange.
    pub usage: TokenUsage,
}

/// Errors that can occur when relaying a conversation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RelayChatError {
    /// Nothing to relay.
    #[error("conversation is empty")]
    EmptyConversation,

    /// The transcript is longer than the configured limit.
    #[error("conversation has {len} messages, limit is {max}")]
    LimitExceeded { len: usize, max: usize },

    /// The model call failed.
    #[error("AI provider error: {0}")]
    Provider(#[from] AIError),

    /// The reply's leading block is not text.
    #[error("reply does not start with a text block")]
    UnexpectedResponseType,
}

/// Generation settings applied to every relayed call.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaySettings {
    pub system_prompt: String,
    pub limit: TurnLimit,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Handler for relaying conversations to the AI provider.
pub struct RelayChatHandler {
    provider: Arc<dyn AIProvider>,
    settings: RelaySettings,
}

impl RelayChatHandler {
    /// Creates a new handler with the given provider and settings.
    pub fn new(provider: Arc<dyn AIProvider>, settings: RelaySettings) -> Self {
        Self { provider, settings }
    }

    /// Returns the turn limit enforced by this handler.
    pub fn limit(&self) -> TurnLimit {
        self.settings.limit
    }

    /// Handles a relay command.
    pub async fn handle(&self, cmd: RelayChatCommand) -> Result<RelayChatResult, RelayChatError> {
        let len = cmd.messages.len();
        if len == 0 {
            return Err(RelayChatError::EmptyConversation);
        }
        if self.settings.limit.is_exceeded_by(len) {
            return Err(RelayChatError::LimitExceeded {
                len,
                max: self.settings.limit.max_messages(),
            });
        }

        let trace_id = Uuid::new_v4().to_string();
        let request = CompletionRequest::new(trace_id.clone())
            .with_messages(cmd.messages)
            .with_system_prompt(self.settings.system_prompt.clone())
            .with_max_tokens(self.settings.max_tokens)
            .with_temperature(self.settings.temperature);

        tracing::debug!(trace_id = %trace_id, message_count = len, "Relaying conversation");

        let response = self.provider.complete(request).await.map_err(|err| {
            tracing::error!(trace_id = %trace_id, error = %err, "Chat completion failed");
            RelayChatError::Provider(err)
        })?;

        let Some(reply) = response.first_text() else {
            tracing::error!(
                trace_id = %trace_id,
                finish_reason = ?response.finish_reason,
                "Reply does not start with a text block"
            );
            return Err(RelayChatError::UnexpectedResponseType);
        };

        tracing::info!(
            trace_id = %trace_id,
            model = %response.model,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            "Chat completion relayed"
        );

        Ok(RelayChatResult {
            reply: reply.to_string(),
            model: response.model.clone(),
            usage: response.usage.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::ports::ContentBlock;

    fn settings() -> RelaySettings {
        RelaySettings {
            system_prompt: "You are Alex's assistant.".to_string(),
            limit: TurnLimit::new(20),
            max_tokens: 10_000,
            temperature: 0.7,
        }
    }

    fn handler(provider: &MockAIProvider) -> RelayChatHandler {
        RelayChatHandler::new(Arc::new(provider.clone()), settings())
    }

    fn transcript(len: usize) -> Vec<Message> {
        (0..len)
            .map(|i| {
                if i % 2 == 0 {
                    Message::user(format!("q{}", i)).unwrap()
                } else {
                    Message::assistant(format!("a{}", i)).unwrap()
                }
            })
            .collect()
    }

    #[tokio::test]
    async fn relays_reply_text() {
        let provider = MockAIProvider::new().with_response("Alex works on distributed systems.");
        let result = handler(&provider)
            .handle(RelayChatCommand::new(transcript(1)))
            .await
            .unwrap();

        assert_eq!(result.reply, "Alex works on distributed systems.");
        assert_eq!(result.model, "mock-model-1");
    }

    #[tokio::test]
    async fn forwards_persona_and_settings() {
        let provider = MockAIProvider::new();
        handler(&provider)
            .handle(RelayChatCommand::new(transcript(3)))
            .await
            .unwrap();

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        let request = &calls[0];
        assert_eq!(request.system_prompt.as_deref(), Some("You are Alex's assistant."));
        assert_eq!(request.max_tokens, Some(10_000));
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.messages, transcript(3));
        assert!(Uuid::parse_str(&request.trace_id).is_ok());
    }

    #[tokio::test]
    async fn each_call_gets_fresh_trace_id() {
        let provider = MockAIProvider::new();
        let handler = handler(&provider);
        handler.handle(RelayChatCommand::new(transcript(1))).await.unwrap();
        handler.handle(RelayChatCommand::new(transcript(1))).await.unwrap();

        let calls = provider.get_calls();
        assert_ne!(calls[0].trace_id, calls[1].trace_id);
    }

    #[tokio::test]
    async fn uses_leading_text_block() {
        let provider = MockAIProvider::new().with_blocks(vec![
            ContentBlock::text("first"),
            ContentBlock::text("second"),
        ]);
        let result = handler(&provider)
            .handle(RelayChatCommand::new(transcript(1)))
            .await
            .unwrap();
        assert_eq!(result.reply, "first");
    }

    #[tokio::test]
    async fn text_after_non_text_block_is_unexpected() {
        let provider = MockAIProvider::new().with_blocks(vec![
            ContentBlock::other("tool_use"),
            ContentBlock::text("later text"),
        ]);
        let err = handler(&provider)
            .handle(RelayChatCommand::new(transcript(1)))
            .await
            .unwrap_err();
        assert_eq!(err, RelayChatError::UnexpectedResponseType);
    }

    #[tokio::test]
    async fn empty_reply_content_is_unexpected() {
        let provider = MockAIProvider::new().with_blocks(Vec::new());
        let err = handler(&provider)
            .handle(RelayChatCommand::new(transcript(1)))
            .await
            .unwrap_err();
        assert_eq!(err, RelayChatError::UnexpectedResponseType);
    }

    #[tokio::test]
    async fn reply_without_text_is_unexpected() {
        let provider = MockAIProvider::new().with_non_text_response("tool_use");
        let err = handler(&provider)
            .handle(RelayChatCommand::new(transcript(1)))
            .await
            .unwrap_err();
        assert_eq!(err, RelayChatError::UnexpectedResponseType);
    }

    #[tokio::test]
    async fn provider_error_is_surfaced() {
        let provider = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
        let err = handler(&provider)
            .handle(RelayChatCommand::new(transcript(1)))
            .await
            .unwrap_err();
        assert_eq!(err, RelayChatError::Provider(AIError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn empty_conversation_is_rejected_without_call() {
        let provider = MockAIProvider::new();
        let err = handler(&provider)
            .handle(RelayChatCommand::new(Vec::new()))
            .await
            .unwrap_err();
        assert_eq!(err, RelayChatError::EmptyConversation);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn history_at_limit_is_relayed() {
        let provider = MockAIProvider::new();
        assert!(handler(&provider)
            .handle(RelayChatCommand::new(transcript(20)))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn history_over_limit_is_rejected_without_call() {
        let provider = MockAIProvider::new();
        let err = handler(&provider)
            .handle(RelayChatCommand::new(transcript(21)))
            .await
            .unwrap_err();
        assert_eq!(err, RelayChatError::LimitExceeded { len: 21, max: 20 });
        assert_eq!(provider.call_count(), 0);
    }
}
