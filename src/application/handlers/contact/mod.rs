//! Contact relay handlers.

mod send_contact;

pub use send_contact::{ContactRouting, SendContactError, SendContactHandler};
