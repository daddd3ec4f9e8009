//! Chat view - renders a [`ConversationController`] to HTML.
//!
//! Rendering is a pure function of controller state.

use std::fmt::Write;

use crate::domain::conversation::{Message, Role};
use crate::domain::foundation::escape_html;
use crate::ports::MessageFormatter;

use super::conversation_controller::{ConversationController, InputState};

const TITLE: &str = "Chat with Alex";
const GREETING: &str = "👋 Hi! I'm Alex's AI assistant. Ask me anything about his work \
                        experience, background, or interests!";

/// HTML renderer for the chat panel.
pub struct ChatView<'a> {
    formatter: &'a dyn MessageFormatter,
}

impl<'a> ChatView<'a> {
    /// Creates a view that renders assistant replies with `formatter`.
    pub fn new(formatter: &'a dyn MessageFormatter) -> Self {
        Self { formatter }
    }

    /// Renders the whole panel.
    pub fn render(&self, controller: &ConversationController) -> String {
        let mut html = String::new();

        if controller.is_empty() {
            html.push_str(r#"<div class="chat-welcome">"#);
            let _ = write!(html, "<h1>{}</h1><p>{}</p>", TITLE, GREETING);
            html.push_str(&self.render_input(controller));
            html.push_str("</div>");
            return html;
        }

        html.push_str(r#"<div class="chat-thread">"#);
        for message in controller.messages() {
            html.push_str(&self.render_message(message));
        }
        if controller.is_busy() {
            html.push_str(
                r#"<div class="message message-assistant"><div class="typing-indicator" aria-label="Assistant is typing"><span></span><span></span><span></span></div></div>"#,
            );
        }
        html.push_str("</div>");

        if let Some(notice) = controller.notice() {
            let _ = write!(
                html,
                r#"<div class="notice" role="alert">{}</div>"#,
                escape_html(notice.message())
            );
        }

        html.push_str(&self.render_input(controller));
        html
    }

    /// Renders one message bubble.
    pub fn render_message(&self, message: &Message) -> String {
        match message.role() {
            Role::User => format!(
                r#"<div class="message message-user" style="justify-content:flex-end"><div class="bubble"><p style="white-space:pre-wrap">{}</p></div></div>"#,
                escape_html(message.content())
            ),
            Role::Assistant => format!(
                r#"<div class="message message-assistant" style="justify-content:flex-start"><div class="bubble">{}</div></div>"#,
                self.formatter.format(message.content())
            ),
        }
    }

    fn render_input(&self, controller: &ConversationController) -> String {
        match controller.input_state() {
            InputState::Ready => format!(
                r#"<form class="chat-input"><textarea name="message" placeholder="Ask about Alex..."></textarea><button type="submit">Send</button><span class="remaining">{}</span></form>"#,
                questions_left(controller.remaining_questions())
            ),
            InputState::Busy => r#"<form class="chat-input busy"><textarea name="message" disabled></textarea><button type="submit" disabled>Send</button></form>"#
                .to_string(),
            InputState::LimitReached => r#"<form class="chat-input limit-reached"><textarea name="message" disabled placeholder="No more questions in this conversation"></textarea><button type="submit" disabled>Send</button></form>"#
                .to_string(),
        }
    }
}

fn questions_left(count: usize) -> String {
    if count == 1 {
        "1 question left".to_string()
    } else {
        format!("{} questions left", count)
    }
}
