//! Conversation controller - the chat panel's state machine.
//!
//! Owns the transcript, the turn limit, the busy flag and the current notice.
//! One controller lives as long as its chat panel; dropping it discards the
//! conversation.
//!
//! A turn is split in two so the busy state is observable while the proxy
//! call is outstanding:
//!
//! ```ignore
//! let payload = controller.begin_turn("What does Alex do?")?;
//! let result = gateway.send(&payload).await;
//! controller.finish_turn(result);
//! ```

use crate::domain::conversation::{Conversation, Message, TurnLimit};
use crate::ports::{ChatGateway, GatewayError};

/// Why a submission was refused before any request was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// Text was empty after trimming.
    #[error("message is empty")]
    EmptyMessage,
    /// The conversation already holds `max_messages` turns.
    #[error("conversation limit reached")]
    LimitReached,
    /// A previous turn is still waiting for its reply.
    #[error("a reply is still pending")]
    Busy,
}

/// User-visible notice raised by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    LimitReached,
    EmptyMessage,
    Busy,
    RequestFailed,
}

impl Notice {
    /// Text shown to the visitor.
    pub fn message(&self) -> &'static str {
        match self {
            Notice::LimitReached => {
                "You have reached the maximum number of questions for this conversation."
            }
            Notice::EmptyMessage => "Please enter a message.",
            Notice::Busy => "Please wait for the current response.",
            Notice::RequestFailed => "Failed to get response. Please try again.",
        }
    }
}

impl From<Rejection> for Notice {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::EmptyMessage => Notice::EmptyMessage,
            Rejection::LimitReached => Notice::LimitReached,
            Rejection::Busy => Notice::Busy,
        }
    }
}

/// What the input control should offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    /// Accepting a new question.
    Ready,
    /// Waiting for a reply.
    Busy,
    /// No more questions in this conversation.
    LimitReached,
}

/// How an accepted turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The assistant reply was appended.
    Answered,
    /// The exchange failed; the user turn stays and a notice is raised.
    Failed,
    /// No turn was in flight; the result was dropped.
    Ignored,
}

/// Client-side conversation state for one chat panel.
#[derive(Debug, Clone, Default)]
pub struct ConversationController {
    conversation: Conversation,
    limit: TurnLimit,
    busy: bool,
    notice: Option<Notice>,
}

impl ConversationController {
    /// Creates an empty controller with the given limit.
    pub fn new(limit: TurnLimit) -> Self {
        Self {
            conversation: Conversation::new(),
            limit,
            busy: false,
            notice: None,
        }
    }

    /// Runs one full turn through `gateway`.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] if the turn was refused; no request is made
    /// in that case.
    pub async fn submit(
        &mut self,
        gateway: &dyn ChatGateway,
        text: &str,
    ) -> Result<TurnOutcome, Rejection> {
        let payload = self.begin_turn(text)?;
        let result = gateway.send(&payload).await;
        Ok(self.finish_turn(result))
    }

    /// Accepts a user turn and returns the full transcript to send.
    ///
    /// The user message is appended immediately and the controller becomes
    /// busy until [`finish_turn`](Self::finish_turn).
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] and raises the matching notice if the text is
    /// blank, the limit is reached or a turn is already in flight.
    pub fn begin_turn(&mut self, text: &str) -> Result<Vec<Message>, Rejection> {
        if let Err(rejection) = self.check_accepts(text) {
            self.notice = Some(rejection.into());
            return Err(rejection);
        }

        let message = Message::user(text.trim()).map_err(|_| Rejection::EmptyMessage)?;
        self.conversation.push(message);
        self.busy = true;
        self.notice = None;

        Ok(self.conversation.messages().to_vec())
    }

    /// Completes the in-flight turn with the proxy's result.
    ///
    /// A failed turn keeps the user message and still counts toward the limit.
    /// Without a turn in flight the result is dropped and the transcript is
    /// left untouched.
    pub fn finish_turn(&mut self, result: Result<String, GatewayError>) -> TurnOutcome {
        if !self.busy {
            tracing::warn!(ok = result.is_ok(), "Chat result arrived with no turn in flight");
            return TurnOutcome::Ignored;
        }
        self.busy = false;

        match result.and_then(|text| {
            Message::assistant(text).map_err(|_| GatewayError::malformed("empty reply"))
        }) {
            Ok(reply) => {
                self.conversation.push(reply);
                TurnOutcome::Answered
            }
            Err(err) => {
                tracing::warn!(error = %err, "Chat request failed");
                self.notice = Some(Notice::RequestFailed);
                TurnOutcome::Failed
            }
        }
    }

    fn check_accepts(&self, text: &str) -> Result<(), Rejection> {
        if !self.conversation.accepts_turn(&self.limit) {
            return Err(Rejection::LimitReached);
        }
        if self.busy {
            return Err(Rejection::Busy);
        }
        if text.trim().is_empty() {
            return Err(Rejection::EmptyMessage);
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    pub fn len(&self) -> usize {
        self.conversation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversation.is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn limit(&self) -> TurnLimit {
        self.limit
    }

    pub fn remaining_messages(&self) -> usize {
        self.limit.remaining_messages(self.len())
    }

    pub fn remaining_questions(&self) -> usize {
        self.limit.remaining_questions(self.len())
    }

    /// Limit takes precedence over busy.
    pub fn input_state(&self) -> InputState {
        if self.limit.is_reached(self.len()) {
            InputState::LimitReached
        } else if self.busy {
            InputState::Busy
        } else {
            InputState::Ready
        }
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
