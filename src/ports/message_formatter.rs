//! Message Formatter Port - rich rendering of assistant replies.

/// Turns assistant text (markdown) into HTML that is safe to embed.
///
/// Implementations must never emit executable markup: embedded HTML is
/// escaped and script-bearing links are dropped.
pub trait MessageFormatter: Send + Sync {
    /// Renders `markdown` to an HTML fragment.
    fn format(&self, markdown: &str) -> String;
}
