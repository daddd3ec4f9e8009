//! SendContact command handler.
//!
//! Re-validates a contact form and emails it to the site owner.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::contact::{ContactForm, ContactSubmission};
use crate::domain::foundation::{escape_html, ValidationError};
use crate::ports::{Email, MailError, Mailer};

/// Errors that can occur when sending a contact message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SendContactError {
    /// A form field failed validation.
    #[error("invalid contact form: {0}")]
    Invalid(ValidationError),

    /// The mail provider did not accept the message.
    #[error("mail delivery failed: {0}")]
    Delivery(#[from] MailError),
}

/// Sender and recipient for contact emails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRouting {
    /// Formatted sender, e.g. `Chat with Alex <onboarding@resend.dev>`.
    pub from: String,
    /// Site owner's inbox.
    pub to: String,
}

/// Handler for contact form submissions.
pub struct SendContactHandler {
    mailer: Arc<dyn Mailer>,
    routing: ContactRouting,
}

impl SendContactHandler {
    /// Creates a new handler with the given mailer and routing.
    pub fn new(mailer: Arc<dyn Mailer>, routing: ContactRouting) -> Self {
        Self { mailer, routing }
    }

    /// Validates `form` and sends it.
    pub async fn handle(&self, form: ContactForm) -> Result<(), SendContactError> {
        let submission = form.to_submission().map_err(|errors| {
            SendContactError::Invalid(
                errors
                    .first_error()
                    .unwrap_or_else(|| ValidationError::empty_field("form")),
            )
        })?;

        let email = self.compose(&submission);
        self.mailer.send(email).await.map_err(|err| {
            tracing::error!(error = %err, "Contact email not delivered");
            SendContactError::Delivery(err)
        })?;

        tracing::info!("Contact message delivered");
        Ok(())
    }

    /// Builds the email for a validated submission.
    pub fn compose(&self, submission: &ContactSubmission) -> Email {
        let name = submission.name();
        let email = submission.email();
        let message = submission.message();

        let html = format!(
            "<h2>New Contact Form Message</h2>\
             <p><strong>Name:</strong> {}</p>\
             <p><strong>Email:</strong> {}</p>\
             <p><strong>Message:</strong></p>\
             <p>{}</p>",
            escape_html(name),
            escape_html(email),
            escape_html(message).replace('\n', "<br>"),
        );

        Email {
            from: self.routing.from.clone(),
            to: vec![self.routing.to.clone()],
            reply_to: Some(email.to_string()),
            subject: format!("New Contact Form Message from {}", name),
            text: format!("Name: {}\nEmail: {}\n\nMessage:\n{}", name, email, message),
            html,
        }
    }
}
