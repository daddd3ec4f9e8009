//! SMTP mailer - delivers email through an authenticated SMTP relay.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message as MimeMessage, Tokio1Executor};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::config::EmailConfig;
use crate::ports::{Email, MailError, Mailer};

/// SMTP relay configuration.
#[derive(Debug, Clone)]
pub struct SmtpRelayConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    password: Secret<String>,
    /// Implicit TLS when true, STARTTLS otherwise.
    pub secure: bool,
    pub timeout: Duration,
}

impl SmtpRelayConfig {
    /// Creates a configuration for an implicit-TLS relay on port 465.
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: 465,
            user: user.into(),
            password: Secret::new(password.into()),
            secure: true,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&EmailConfig> for SmtpRelayConfig {
    fn from(config: &EmailConfig) -> Self {
        let smtp = &config.smtp;
        Self::new(&smtp.host, &smtp.user, &smtp.password)
            .with_port(smtp.port)
            .with_secure(smtp.secure)
            .with_timeout(smtp.timeout())
    }
}

/// SMTP mailer adapter.
///
/// Sends each [`Email`] as a `multipart/alternative` message (plain text and
/// HTML) over a pooled async transport.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Builds the transport. No connection is opened until the first send.
    pub fn new(config: SmtpRelayConfig) -> Result<Self, MailError> {
        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| MailError::Transport(e.to_string()))?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.user.clone(),
                config.password.expose_secret().clone(),
            ))
            .timeout(Some(config.timeout))
            .build();

        Ok(Self { transport })
    }

    fn build_message(email: &Email) -> Result<MimeMessage, MailError> {
        let mut builder = MimeMessage::builder()
            .from(parse_mailbox(&email.from)?)
            .subject(email.subject.as_str());
        for to in &email.to {
            builder = builder.to(parse_mailbox(to)?);
        }
        if let Some(reply_to) = &email.reply_to {
            builder = builder.reply_to(parse_mailbox(reply_to)?);
        }

        builder
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html.clone()),
                    ),
            )
            .map_err(|e| MailError::Rejected(e.to_string()))
    }

    /// Maps an SMTP reply code to a mail error.
    fn classify(code: Option<u16>, message: String) -> MailError {
        match code {
            Some(530 | 534 | 535) => MailError::AuthenticationFailed,
            Some(500..=599) => MailError::Rejected(message),
            _ => MailError::Transport(message),
        }
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse()
        .map_err(|_| MailError::Rejected(format!("invalid address: {}", address)))
}

fn reply_code(err: &lettre::transport::smtp::Error) -> Option<u16> {
    err.status().and_then(|code| code.to_string().parse().ok())
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        let message = Self::build_message(&email)?;

        self.transport.send(message).await.map_err(|err| {
            tracing::error!(error = %err, "SMTP send failed");
            Self::classify(reply_code(&err), err.to_string())
        })?;

        tracing::debug!(subject = %email.subject, "Email accepted by SMTP relay");
        Ok(())
    }
}
