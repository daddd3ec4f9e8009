//! Portfolio Chat - "Chat with Alex"
//!
//! A personal-site chat assistant: a stateless proxy that relays a visitor's
//! conversation to a language model under a fixed persona, a client-side
//! controller that caps each conversation at a fixed number of turns, and a
//! contact form relayed by email.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
