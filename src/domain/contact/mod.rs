//! Contact domain module.
//!
//! Validation rules for the "reach out in real life" form and the transient
//! notifications shown after a submission attempt.

mod form;
mod notification;

pub use form::{ContactForm, ContactSubmission, FormErrors};
pub use notification::{Notification, NotificationKind, NOTIFICATION_DURATION};
