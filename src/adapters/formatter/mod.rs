//! Message Formatter Adapters.

mod pulldown_formatter;

pub use pulldown_formatter::{PlainTextFormatter, PulldownFormatter};
