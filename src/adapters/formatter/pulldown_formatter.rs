//! Pulldown-cmark based message formatter.
//!
//! Renders assistant replies as CommonMark with tables and strikethrough.
//! Raw HTML in the reply is shown as text, and links or images whose scheme
//! is not `http`, `https` or `mailto` are pointed at `#`.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

use crate::domain::foundation::escape_html;
use crate::ports::MessageFormatter;

const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Markdown formatter that never emits executable markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct PulldownFormatter;

impl PulldownFormatter {
    pub fn new() -> Self {
        Self
    }

    fn options() -> Options {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options
    }
}

/// Returns true if `dest` is relative or uses an allowed scheme.
fn is_safe_destination(dest: &str) -> bool {
    // Browsers drop whitespace and control characters inside schemes.
    let cleaned: String = dest
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    let scheme_end = cleaned.find(':');
    let path_start = cleaned.find(|c| matches!(c, '/' | '?' | '#'));

    match (scheme_end, path_start) {
        (None, _) => true,
        (Some(colon), Some(path)) if path < colon => true,
        (Some(colon), _) => SAFE_SCHEMES.contains(&&cleaned[..colon]),
    }
}

fn sanitize_dest(dest: CowStr<'_>) -> CowStr<'_> {
    if is_safe_destination(&dest) {
        dest
    } else {
        CowStr::Borrowed("#")
    }
}

fn sanitize(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) => Event::Text(raw),
        Event::Start(Tag::Link(kind, dest, title)) => {
            Event::Start(Tag::Link(kind, sanitize_dest(dest), title))
        }
        Event::End(Tag::Link(kind, dest, title)) => {
            Event::End(Tag::Link(kind, sanitize_dest(dest), title))
        }
        Event::Start(Tag::Image(kind, dest, title)) => {
            Event::Start(Tag::Image(kind, sanitize_dest(dest), title))
        }
        Event::End(Tag::Image(kind, dest, title)) => {
            Event::End(Tag::Image(kind, sanitize_dest(dest), title))
        }
        other => other,
    }
}

impl MessageFormatter for PulldownFormatter {
    fn format(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Self::options()).map(sanitize);

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, parser);
        html_output
    }
}

/// Plain formatter: escaped text in a paragraph, line breaks kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextFormatter;

impl MessageFormatter for PlainTextFormatter {
    fn format(&self, text: &str) -> String {
        format!("<p>{}</p>", escape_html(text).replace('\n', "<br>"))
    }
}
