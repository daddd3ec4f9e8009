//! Chat persona and conversation limit configuration

use serde::Deserialize;

use crate::domain::conversation::{TurnLimit, DEFAULT_MAX_MESSAGES};

use super::error::ValidationError;

/// Chat configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Instruction text sent with every generation request
    pub system_prompt: String,

    /// Maximum turns (user + assistant) per conversation
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,
}

impl ChatConfig {
    /// The turn limit shared by the controller and the proxy
    pub fn turn_limit(&self) -> TurnLimit {
        TurnLimit::new(self.max_messages)
    }

    /// Validate chat configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.system_prompt.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SYSTEM_PROMPT"));
        }
        if self.max_messages == 0 || self.max_messages % 2 != 0 {
            return Err(ValidationError::InvalidMaxMessages);
        }
        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            system_prompt: String::new(),
            max_messages: default_max_messages(),
        }
    }
}

fn default_max_messages() -> usize {
    DEFAULT_MAX_MESSAGES
}
