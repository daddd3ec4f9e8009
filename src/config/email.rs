//! Email configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Which transport delivers contact messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Resend transactional API
    #[default]
    Resend,
    /// Authenticated SMTP relay
    Smtp,
}

/// SMTP relay settings
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    /// Relay host name
    #[serde(default)]
    pub host: String,

    /// Relay port
    #[serde(default = "default_smtp_port")]
    pub port: u16,

    /// Login user; also the sender address
    #[serde(default)]
    pub user: String,

    /// Login password
    #[serde(default)]
    pub password: String,

    /// Implicit TLS when true, STARTTLS otherwise
    #[serde(default = "default_smtp_secure")]
    pub secure: bool,

    /// Send timeout in seconds
    #[serde(default = "default_smtp_timeout")]
    pub timeout_secs: u64,
}

impl SmtpConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate SMTP settings
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.host.is_empty() {
            return Err(ValidationError::MissingRequired("SMTP_HOST"));
        }
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.user.is_empty() {
            return Err(ValidationError::MissingRequired("SMTP_USER"));
        }
        if !self.user.contains('@') {
            return Err(ValidationError::InvalidSmtpUser);
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingRequired("SMTP_PASSWORD"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_smtp_port(),
            user: String::new(),
            password: String::new(),
            secure: default_smtp_secure(),
            timeout_secs: default_smtp_timeout(),
        }
    }
}

/// Email configuration (Resend or SMTP)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Delivery transport
    #[serde(default)]
    pub provider: MailProvider,

    /// Resend API key
    #[serde(default)]
    pub resend_api_key: String,

    /// Resend API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Where contact form messages are delivered
    pub contact_email: String,

    /// SMTP relay settings, used when `provider` is `smtp`
    #[serde(default)]
    pub smtp: SmtpConfig,
}

impl EmailConfig {
    /// Address messages are sent from.
    ///
    /// SMTP relays send as the login user.
    pub fn sender_address(&self) -> &str {
        match self.provider {
            MailProvider::Resend => &self.from_email,
            MailProvider::Smtp => &self.smtp.user,
        }
    }

    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.sender_address())
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.provider {
            MailProvider::Resend => {
                if self.resend_api_key.is_empty() {
                    return Err(ValidationError::MissingRequired("RESEND_API_KEY"));
                }
                if !self.resend_api_key.starts_with("re_") {
                    return Err(ValidationError::InvalidResendKey);
                }
                if !self.from_email.contains('@') {
                    return Err(ValidationError::InvalidFromEmail);
                }
            }
            MailProvider::Smtp => self.smtp.validate()?,
        }
        if self.contact_email.is_empty() {
            return Err(ValidationError::MissingRequired("CONTACT_EMAIL"));
        }
        if !self.contact_email.contains('@') {
            return Err(ValidationError::InvalidContactEmail);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::default(),
            resend_api_key: String::new(),
            api_url: default_api_url(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            contact_email: String::new(),
            smtp: SmtpConfig::default(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.resend.com".to_string()
}

fn default_from_email() -> String {
    "onboarding@resend.dev".to_string()
}

fn default_from_name() -> String {
    "Chat with Alex".to_string()
}

fn default_smtp_port() -> u16 {
    465
}

fn default_smtp_secure() -> bool {
    true
}

fn default_smtp_timeout() -> u64 {
    30
}
