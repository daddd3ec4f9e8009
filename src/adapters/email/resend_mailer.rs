//! Resend mailer - delivers email through the Resend transactional API.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

use crate::config::EmailConfig;
use crate::ports::{Email, MailError, Mailer};

/// Resend API configuration.
#[derive(Debug, Clone)]
pub struct ResendConfig {
    api_key: Secret<String>,
    /// API base URL (default: https://api.resend.com).
    pub api_base_url: String,
}

impl ResendConfig {
    /// Creates a configuration for the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            api_base_url: "https://api.resend.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

impl From<&EmailConfig> for ResendConfig {
    fn from(config: &EmailConfig) -> Self {
        Self::new(config.resend_api_key.clone()).with_base_url(config.api_url.clone())
    }
}

/// Resend mailer adapter.
///
/// Implements `Mailer` by posting to `{base}/emails` with bearer auth.
pub struct ResendMailer {
    config: ResendConfig,
    http_client: reqwest::Client,
}

impl ResendMailer {
    /// Create a new Resend mailer with the given configuration.
    pub fn new(config: ResendConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.config.api_base_url.trim_end_matches('/'))
    }

    fn error_for_status(status: u16, body: String) -> MailError {
        match status {
            401 | 403 => MailError::AuthenticationFailed,
            400..=499 => MailError::Rejected(body),
            _ => MailError::Transport(format!("Resend returned {}: {}", status, body)),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        let response = self
            .http_client
            .post(self.emails_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&email)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), error = %error_text, "Resend send failed");
            return Err(Self::error_for_status(status.as_u16(), error_text));
        }

        tracing::debug!(subject = %email.subject, "Email accepted by Resend");
        Ok(())
    }
}
