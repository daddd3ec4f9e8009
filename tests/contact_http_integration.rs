//! Integration tests for the contact relay.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use portfolio_chat::adapters::ai::MockAIProvider;
use portfolio_chat::adapters::email::MockMailer;
use portfolio_chat::adapters::gateway::HttpContactGateway;
use portfolio_chat::adapters::http::{app_router, ChatAppState, ContactAppState};
use portfolio_chat::application::components::{ContactDialog, SubmitOutcome};
use portfolio_chat::application::handlers::{
    ContactRouting, RelayChatHandler, RelaySettings, SendContactHandler,
};
use portfolio_chat::config::ServerConfig;
use portfolio_chat::domain::contact::ContactForm;
use portfolio_chat::domain::conversation::TurnLimit;
use portfolio_chat::ports::MailError;

async fn serve(mailer: MockMailer) -> SocketAddr {
    let relay = RelayChatHandler::new(
        Arc::new(MockAIProvider::new()),
        RelaySettings {
            system_prompt: "persona".to_string(),
            limit: TurnLimit::default(),
            max_tokens: 100,
            temperature: 0.7,
        },
    );
    let sender = SendContactHandler::new(
        Arc::new(mailer),
        ContactRouting {
            from: "Chat with Alex <onboarding@resend.dev>".to_string(),
            to: "alex@example.com".to_string(),
        },
    );
    let app = app_router(
        ChatAppState::new(Arc::new(relay)),
        ContactAppState::new(Arc::new(sender)),
        &ServerConfig::default(),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn dialog_with(email: &str) -> ContactDialog {
    let mut dialog = ContactDialog::new();
    dialog.open();
    *dialog.form_mut() = ContactForm::new("Jamie Rivera", email, "Loved your talk.\nCoffee?");
    dialog
}

#[tokio::test]
async fn dialog_delivers_through_relay() {
    let mailer = MockMailer::new();
    let addr = serve(mailer.clone()).await;
    let gateway = HttpContactGateway::new(format!("http://{}", addr)).unwrap();
    let mut dialog = dialog_with("jamie@example.com");

    let outcome = dialog.submit(&gateway, Instant::now()).await;

    assert_eq!(outcome, SubmitOutcome::Sent);
    assert!(!dialog.is_open());
    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "New Contact Form Message from Jamie Rivera");
    assert_eq!(sent[0].reply_to.as_deref(), Some("jamie@example.com"));
    assert!(sent[0].text.ends_with("Message:\nLoved your talk.\nCoffee?"));
}

#[tokio::test]
async fn invalid_email_never_leaves_the_dialog() {
    let mailer = MockMailer::new();
    let addr = serve(mailer.clone()).await;
    let gateway = HttpContactGateway::new(format!("http://{}", addr)).unwrap();
    let mut dialog = dialog_with("not-an-email");

    let outcome = dialog.submit(&gateway, Instant::now()).await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(dialog.errors().email, Some("Please enter a valid email"));
    assert_eq!(mailer.sent_count(), 0);
}

#[tokio::test]
async fn relay_failure_shows_error_notification() {
    let addr = serve(MockMailer::failing(MailError::Rejected("domain not verified".to_string()))).await;
    let gateway = HttpContactGateway::new(format!("http://{}", addr)).unwrap();
    let mut dialog = dialog_with("jamie@example.com");
    let now = Instant::now();

    let outcome = dialog.submit(&gateway, now).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert!(dialog.is_open());
    assert_eq!(dialog.form().name, "Jamie Rivera");
    let toast = dialog.notification(now).unwrap();
    assert_eq!(toast.message(), "Failed to send message. Please try again.");
}

#[tokio::test]
async fn server_revalidates_direct_posts() {
    let mailer = MockMailer::new();
    let addr = serve(mailer.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/api/contact", addr))
        .json(&serde_json::json!({"name": "", "email": "x@y.z", "message": "hi"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert_eq!(mailer.sent_count(), 0);
}
