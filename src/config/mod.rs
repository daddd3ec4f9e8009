//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PORTFOLIO_CHAT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use portfolio_chat::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod ai;
mod chat;
mod email;
mod error;
mod server;

pub use ai::AiConfig;
pub use chat::ChatConfig;
pub use email::{EmailConfig, MailProvider, SmtpConfig};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI provider configuration (Anthropic)
    #[serde(default)]
    pub ai: AiConfig,

    /// Persona prompt and turn limit
    pub chat: ChatConfig,

    /// Email configuration (Resend or SMTP)
    pub email: EmailConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PORTFOLIO_CHAT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PORTFOLIO_CHAT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PORTFOLIO_CHAT__CHAT__SYSTEM_PROMPT=...` -> `chat.system_prompt = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PORTFOLIO_CHAT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.chat.validate()?;
        self.email.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("PORTFOLIO_CHAT__AI__ANTHROPIC_API_KEY", "sk-ant-xxx");
        env::set_var(
            "PORTFOLIO_CHAT__CHAT__SYSTEM_PROMPT",
            "You are Alex's assistant. Answer questions about Alex's work.",
        );
        env::set_var("PORTFOLIO_CHAT__EMAIL__RESEND_API_KEY", "re_xxx");
        env::set_var("PORTFOLIO_CHAT__EMAIL__CONTACT_EMAIL", "alex@example.com");
    }

    fn clear_env() {
        env::remove_var("PORTFOLIO_CHAT__AI__ANTHROPIC_API_KEY");
        env::remove_var("PORTFOLIO_CHAT__CHAT__SYSTEM_PROMPT");
        env::remove_var("PORTFOLIO_CHAT__CHAT__MAX_MESSAGES");
        env::remove_var("PORTFOLIO_CHAT__EMAIL__RESEND_API_KEY");
        env::remove_var("PORTFOLIO_CHAT__EMAIL__CONTACT_EMAIL");
        env::remove_var("PORTFOLIO_CHAT__SERVER__PORT");
        env::remove_var("PORTFOLIO_CHAT__SERVER__ENVIRONMENT");
        env::remove_var("PORTFOLIO_CHAT__EMAIL__PROVIDER");
        env::remove_var("PORTFOLIO_CHAT__EMAIL__SMTP__HOST");
        env::remove_var("PORTFOLIO_CHAT__EMAIL__SMTP__PORT");
        env::remove_var("PORTFOLIO_CHAT__EMAIL__SMTP__USER");
        env::remove_var("PORTFOLIO_CHAT__EMAIL__SMTP__PASSWORD");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.ai.anthropic_api_key.as_deref(), Some("sk-ant-xxx"));
        assert_eq!(config.email.contact_email, "alex@example.com");
        assert!(config.chat.system_prompt.starts_with("You are Alex's assistant."));
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.chat.max_messages, 20);
        assert_eq!(config.ai.model, "claude-sonnet-4-5-20250929");
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PORTFOLIO_CHAT__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_limit_and_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PORTFOLIO_CHAT__SERVER__PORT", "3000");
        env::set_var("PORTFOLIO_CHAT__CHAT__MAX_MESSAGES", "10");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.chat.max_messages, 10);
    }

    #[test]
    fn test_smtp_provider_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::remove_var("PORTFOLIO_CHAT__EMAIL__RESEND_API_KEY");
        env::set_var("PORTFOLIO_CHAT__EMAIL__PROVIDER", "smtp");
        env::set_var("PORTFOLIO_CHAT__EMAIL__SMTP__HOST", "smtp.example.com");
        env::set_var("PORTFOLIO_CHAT__EMAIL__SMTP__PORT", "587");
        env::set_var("PORTFOLIO_CHAT__EMAIL__SMTP__USER", "relay@example.com");
        env::set_var("PORTFOLIO_CHAT__EMAIL__SMTP__PASSWORD", "hunter2");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.email.provider, MailProvider::Smtp);
        assert_eq!(config.email.smtp.host, "smtp.example.com");
        assert_eq!(config.email.smtp.port, 587);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_system_prompt_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::remove_var("PORTFOLIO_CHAT__CHAT__SYSTEM_PROMPT");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_err());
    }
}
