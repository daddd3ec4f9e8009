//! Portfolio Chat server.

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use portfolio_chat::adapters::ai::{AnthropicConfig, AnthropicProvider};
use portfolio_chat::adapters::email::{ResendConfig, ResendMailer, SmtpMailer, SmtpRelayConfig};
use portfolio_chat::adapters::http::{app_router, ChatAppState, ContactAppState};
use portfolio_chat::application::handlers::{
    ContactRouting, RelayChatHandler, RelaySettings, SendContactHandler,
};
use portfolio_chat::config::{AppConfig, MailProvider};
use portfolio_chat::ports::Mailer;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config);

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let api_key = config.ai.anthropic_api_key.clone().unwrap_or_default();
    let provider = AnthropicProvider::new(
        AnthropicConfig::new(api_key)
            .with_model(&config.ai.model)
            .with_base_url(&config.ai.base_url)
            .with_timeout(config.ai.timeout())
            .with_max_retries(config.ai.max_retries),
    )?;

    let relay = RelayChatHandler::new(
        Arc::new(provider),
        RelaySettings {
            system_prompt: config.chat.system_prompt.clone(),
            limit: config.chat.turn_limit(),
            max_tokens: config.ai.max_tokens,
            temperature: config.ai.temperature,
        },
    );

    let mailer: Arc<dyn Mailer> = match config.email.provider {
        MailProvider::Resend => Arc::new(ResendMailer::new(ResendConfig::from(&config.email))),
        MailProvider::Smtp => Arc::new(SmtpMailer::new(SmtpRelayConfig::from(&config.email))?),
    };
    let sender = SendContactHandler::new(
        mailer,
        ContactRouting {
            from: config.email.from_header(),
            to: config.email.contact_email.clone(),
        },
    );

    let app = app_router(
        ChatAppState::new(Arc::new(relay)),
        ContactAppState::new(Arc::new(sender)),
        &config.server,
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        %addr,
        model = %config.ai.model,
        max_messages = config.chat.max_messages,
        mail_provider = ?config.email.provider,
        "Portfolio chat listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
