//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (errors)
//! - `conversation` - Chat transcript and turn limit
//! - `contact` - Contact form validation and notifications

pub mod contact;
pub mod conversation;
pub mod foundation;
