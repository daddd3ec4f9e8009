//! Mock mailer for testing.
//!
//! Records every email it is asked to send and can be told to fail.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::ports::{Email, MailError, Mailer};

/// In-memory mailer that records sent emails.
///
/// Clones share the outbox.
#[derive(Debug, Clone, Default)]
pub struct MockMailer {
    sent: Arc<Mutex<Vec<Email>>>,
    failure: Option<MailError>,
}

impl MockMailer {
    /// Creates a mailer that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mailer that rejects every send with `error`.
    pub fn failing(error: MailError) -> Self {
        Self {
            sent: Arc::default(),
            failure: Some(error),
        }
    }

    /// Returns all emails accepted so far.
    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }

    /// Returns the number of emails accepted so far.
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}
