//! Mailer Port - server-side email delivery.
//!
//! The contact relay composes an [`Email`] and hands it to a mailer; the
//! adapter talks to the transactional mail provider.

use async_trait::async_trait;
use serde::Serialize;

/// Port for sending a single email.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends the email.
    async fn send(&self, email: Email) -> Result<(), MailError>;
}

/// A fully composed email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Email {
    /// Formatted sender, e.g. `Alex <noreply@example.com>`.
    pub from: String,
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Address replies should go to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text: String,
    /// HTML body.
    pub html: String,
}

/// Email delivery errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailError {
    /// The provider rejected our credentials.
    #[error("mail provider authentication failed")]
    AuthenticationFailed,

    /// The provider refused the message.
    #[error("mail rejected: {0}")]
    Rejected(String),

    /// The provider could not be reached.
    #[error("mail transport error: {0}")]
    Transport(String),
}
