//! HTTP handler for the chat proxy.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{RelayChatCommand, RelayChatError, RelayChatHandler};

use super::dto::{ChatRequest, ChatResponse, ErrorBody};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the chat endpoint.
#[derive(Clone)]
pub struct ChatAppState {
    pub relay: Arc<RelayChatHandler>,
}

impl ChatAppState {
    pub fn new(relay: Arc<RelayChatHandler>) -> Self {
        Self { relay }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// POST /api/chat
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/chat - Relay a conversation to the model.
///
/// # Errors
/// - 400 Bad Request: malformed body, empty or oversized conversation
/// - 500 Internal Server Error: provider failure or reply without text
pub async fn post_chat(
    State(state): State<ChatAppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ChatApiError> {
    let Json(request) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected chat body");
        ChatApiError::BadRequest("Invalid request body")
    })?;

    let messages = request.into_messages().map_err(|err| {
        tracing::debug!(error = %err, "Rejected chat message");
        ChatApiError::BadRequest("Invalid request body")
    })?;

    let result = state
        .relay
        .handle(RelayChatCommand::new(messages))
        .await
        .map_err(ChatApiError::from)?;

    Ok((StatusCode::OK, Json(ChatResponse { response: result.reply })))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts relay errors to HTTP responses.
#[derive(Debug)]
pub enum ChatApiError {
    BadRequest(&'static str),
    /// Detail is logged; the body carries only the public message.
    Internal {
        public: &'static str,
        detail: String,
    },
}

impl From<RelayChatError> for ChatApiError {
    fn from(err: RelayChatError) -> Self {
        match err {
            RelayChatError::EmptyConversation => ChatApiError::BadRequest("Conversation is empty"),
            RelayChatError::LimitExceeded { .. } => {
                ChatApiError::BadRequest("Conversation limit reached")
            }
            RelayChatError::Provider(e) => ChatApiError::Internal {
                public: "Failed to get response from Claude",
                detail: e.to_string(),
            },
            RelayChatError::UnexpectedResponseType => ChatApiError::Internal {
                public: "Unexpected response type",
                detail: "reply does not start with a text block".to_string(),
            },
        }
    }
}

impl IntoResponse for ChatApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ChatApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg)),
            ChatApiError::Internal { public, detail } => {
                tracing::error!("Chat error: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(public))
            }
        };

        (status, Json(error)).into_response()
    }
}
