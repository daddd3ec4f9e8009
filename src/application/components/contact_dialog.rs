//! Contact dialog - form state, validation and dispatch.
//!
//! Sending is split in two so the "Sending..." state is observable while the
//! relay call is outstanding:
//!
//! ```ignore
//! let submission = dialog.begin_submit()?;
//! let result = gateway.deliver(&submission).await;
//! dialog.finish_submit(result, Instant::now());
//! ```

use std::time::Instant;

use crate::domain::contact::{ContactForm, ContactSubmission, FormErrors, Notification};
use crate::ports::{ContactGateway, GatewayError};

const SENT: &str = "Message sent successfully!";
const SEND_FAILED: &str = "Failed to send message. Please try again.";

/// How a submit attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one field failed validation; nothing was sent.
    Invalid,
    /// Delivered; the dialog closed and the fields were cleared.
    Sent,
    /// Delivery failed; the fields are kept for another try.
    Failed,
    /// A send is already in flight; nothing new was sent.
    Busy,
    /// No send was in flight; the result was dropped.
    Ignored,
}

/// State of the "Get in touch" dialog.
#[derive(Debug, Clone, Default)]
pub struct ContactDialog {
    form: ContactForm,
    errors: FormErrors,
    open: bool,
    sending: bool,
    notification: Option<Notification>,
}

impl ContactDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Label for the submit button.
    pub fn submit_label(&self) -> &'static str {
        if self.sending {
            "Sending..."
        } else {
            "Send Message"
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Mutable access for field edits.
    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// The notification still on screen at `now`, if any.
    pub fn notification(&self, now: Instant) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| n.is_visible_at(now))
    }

    /// Validates and, if valid, delivers the form through `gateway`.
    pub async fn submit(&mut self, gateway: &dyn ContactGateway, now: Instant) -> SubmitOutcome {
        let submission = match self.begin_submit() {
            Ok(submission) => submission,
            Err(outcome) => return outcome,
        };
        let result = gateway.deliver(&submission).await;
        self.finish_submit(result, now)
    }

    /// Validates the form and marks the dialog as sending.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitOutcome::Invalid`] with the field errors recorded, or
    /// [`SubmitOutcome::Busy`] while a previous send is outstanding.
    pub fn begin_submit(&mut self) -> Result<ContactSubmission, SubmitOutcome> {
        if self.sending {
            return Err(SubmitOutcome::Busy);
        }
        let submission = self.form.to_submission().map_err(|errors| {
            self.errors = errors;
            SubmitOutcome::Invalid
        })?;
        self.errors = FormErrors::default();
        self.sending = true;
        Ok(submission)
    }

    /// Completes the outstanding send with the relay's result.
    pub fn finish_submit(
        &mut self,
        result: Result<(), GatewayError>,
        now: Instant,
    ) -> SubmitOutcome {
        if !self.sending {
            tracing::warn!(ok = result.is_ok(), "Contact result arrived with no send in flight");
            return SubmitOutcome::Ignored;
        }
        self.sending = false;

        match result {
            Ok(()) => {
                self.notification = Some(Notification::success(SENT, now));
                self.form.clear();
                self.open = false;
                SubmitOutcome::Sent
            }
            Err(err) => {
                tracing::warn!(error = %err, "Contact form delivery failed");
                self.notification = Some(Notification::error(SEND_FAILED, now));
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contact::NOTIFICATION_DURATION;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingGateway {
        fail: bool,
        delivered: Mutex<Vec<ContactSubmission>>,
    }

    impl RecordingGateway {
        fn ok() -> Self {
            Self {
                fail: false,
                delivered: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                delivered: Mutex::new(Vec::new()),
            }
        }

        fn count(&self) -> usize {
            self.delivered.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ContactGateway for RecordingGateway {
        async fn deliver(&self, submission: &ContactSubmission) -> Result<(), GatewayError> {
            self.delivered.lock().unwrap().push(submission.clone());
            if self.fail {
                Err(GatewayError::status(500, "Failed to send message"))
            } else {
                Ok(())
            }
        }
    }

    fn filled_dialog(email: &str) -> ContactDialog {
        let mut dialog = ContactDialog::new();
        dialog.open();
        *dialog.form_mut() = ContactForm::new("Jamie", email, "Hi Alex!");
        dialog
    }

    #[tokio::test]
    async fn invalid_email_blocks_submission() {
        let mut dialog = filled_dialog("not-an-email");
        let gateway = RecordingGateway::ok();

        let outcome = dialog.submit(&gateway, Instant::now()).await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(dialog.errors().email, Some("Please enter a valid email"));
        assert_eq!(gateway.count(), 0);
        assert!(dialog.is_open());
    }

    #[tokio::test]
    async fn success_closes_and_clears() {
        let mut dialog = filled_dialog("jamie@example.com");
        let gateway = RecordingGateway::ok();
        let now = Instant::now();

        let outcome = dialog.submit(&gateway, now).await;

        assert_eq!(outcome, SubmitOutcome::Sent);
        assert_eq!(gateway.count(), 1);
        assert!(!dialog.is_open());
        assert!(!dialog.is_sending());
        assert_eq!(dialog.form(), &ContactForm::default());
        assert_eq!(dialog.notification(now).unwrap().message(), "Message sent successfully!");
    }

    #[tokio::test]
    async fn failure_keeps_fields() {
        let mut dialog = filled_dialog("jamie@example.com");
        let gateway = RecordingGateway::failing();
        let now = Instant::now();

        let outcome = dialog.submit(&gateway, now).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert!(dialog.is_open());
        assert_eq!(dialog.form().email, "jamie@example.com");
        let toast = dialog.notification(now).unwrap();
        assert!(toast.is_error());
        assert_eq!(toast.message(), "Failed to send message. Please try again.");
    }

    #[tokio::test]
    async fn notification_expires() {
        let mut dialog = filled_dialog("jamie@example.com");
        let now = Instant::now();
        dialog.submit(&RecordingGateway::ok(), now).await;

        assert!(dialog.notification(now + NOTIFICATION_DURATION).is_none());
    }

    #[tokio::test]
    async fn fixing_errors_clears_them() {
        let mut dialog = filled_dialog("bad");
        let gateway = RecordingGateway::ok();
        dialog.submit(&gateway, Instant::now()).await;
        assert!(!dialog.errors().is_empty());

        dialog.form_mut().email = "jamie@example.com".to_string();
        dialog.submit(&gateway, Instant::now()).await;
        assert!(dialog.errors().is_empty());
    }

    #[test]
    fn sending_state_is_visible_between_begin_and_finish() {
        let mut dialog = filled_dialog("jamie@example.com");
        assert_eq!(dialog.submit_label(), "Send Message");

        let submission = dialog.begin_submit().unwrap();
        assert_eq!(submission.email(), "jamie@example.com");
        assert!(dialog.is_sending());
        assert_eq!(dialog.submit_label(), "Sending...");

        let outcome = dialog.finish_submit(Ok(()), Instant::now());
        assert_eq!(outcome, SubmitOutcome::Sent);
        assert!(!dialog.is_sending());
        assert_eq!(dialog.submit_label(), "Send Message");
    }

    #[test]
    fn second_submit_while_sending_is_busy() {
        let mut dialog = filled_dialog("jamie@example.com");
        dialog.begin_submit().unwrap();

        assert_eq!(dialog.begin_submit().unwrap_err(), SubmitOutcome::Busy);
        assert!(dialog.is_sending());
    }

    #[test]
    fn invalid_form_never_enters_sending() {
        let mut dialog = filled_dialog("bad");

        assert_eq!(dialog.begin_submit().unwrap_err(), SubmitOutcome::Invalid);
        assert!(!dialog.is_sending());
        assert_eq!(dialog.submit_label(), "Send Message");
    }

    #[test]
    fn finish_without_send_in_flight_is_ignored() {
        let mut dialog = filled_dialog("jamie@example.com");
        let now = Instant::now();

        assert_eq!(dialog.finish_submit(Ok(()), now), SubmitOutcome::Ignored);
        assert!(dialog.is_open());
        assert_eq!(dialog.form().email, "jamie@example.com");
        assert!(dialog.notification(now).is_none());
    }
}
