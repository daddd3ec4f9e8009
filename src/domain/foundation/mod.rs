//! Foundation module - Shared domain primitives.

mod errors;
mod html;

pub use errors::ValidationError;
pub use html::escape_html;
