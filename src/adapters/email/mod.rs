//! Email Adapters.
//!
//! - `ResendMailer` - Resend transactional email API
//! - `SmtpMailer` - Authenticated SMTP relay
//! - `MockMailer` - Recording mailer for tests

mod mock_mailer;
mod resend_mailer;
mod smtp_mailer;

pub use mock_mailer::MockMailer;
pub use resend_mailer::{ResendConfig, ResendMailer};
pub use smtp_mailer::{SmtpMailer, SmtpRelayConfig};
