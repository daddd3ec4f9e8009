//! Chat proxy handlers.

mod relay_chat;

pub use relay_chat::{
    RelayChatCommand, RelayChatError, RelayChatHandler, RelayChatResult, RelaySettings,
};
