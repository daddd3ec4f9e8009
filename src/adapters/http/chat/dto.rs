//! HTTP DTOs for the chat proxy.

use serde::{Deserialize, Serialize};

use crate::domain::conversation::{Message, Role};
use crate::domain::foundation::ValidationError;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<MessageDto>,
}

/// One transcript entry as received. Unknown fields are dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageDto {
    pub role: Role,
    pub content: String,
}

impl TryFrom<MessageDto> for Message {
    type Error = ValidationError;

    fn try_from(dto: MessageDto) -> Result<Self, Self::Error> {
        Message::new(dto.role, dto.content)
    }
}

impl ChatRequest {
    /// Converts every entry into a validated domain message.
    pub fn into_messages(self) -> Result<Vec<Message>, ValidationError> {
        self.messages.into_iter().map(Message::try_from).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Successful reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub response: String,
}

/// Error body shared by the public endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
