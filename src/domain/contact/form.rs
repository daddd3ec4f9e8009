//! Contact form fields and validation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Loose shape check: something@something.something, no whitespace.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

const NAME_REQUIRED: &str = "Name is required";
const EMAIL_INVALID: &str = "Please enter a valid email";
const MESSAGE_REQUIRED: &str = "Message is required";

/// Raw form input as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Per-field error messages. A `None` field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FormErrors {
    /// Returns true if every field passed.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }

    /// Converts the first failing field into a domain validation error.
    pub fn first_error(&self) -> Option<ValidationError> {
        if self.name.is_some() {
            return Some(ValidationError::empty_field("name"));
        }
        if let Some(reason) = self.email {
            return Some(ValidationError::invalid_format("email", reason));
        }
        if self.message.is_some() {
            return Some(ValidationError::empty_field("message"));
        }
        None
    }
}

/// A contact message that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    name: String,
    email: String,
    message: String,
}

impl ContactSubmission {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl ContactForm {
    /// Creates a form from the three field values.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Checks every field and reports all failures at once.
    pub fn validate(&self) -> FormErrors {
        FormErrors {
            name: self.name.trim().is_empty().then_some(NAME_REQUIRED),
            email: (!EMAIL_PATTERN.is_match(&self.email)).then_some(EMAIL_INVALID),
            message: self.message.trim().is_empty().then_some(MESSAGE_REQUIRED),
        }
    }

    /// Validates and produces a submission ready to be dispatched.
    ///
    /// # Errors
    ///
    /// Returns the per-field errors if any field is invalid.
    pub fn to_submission(&self) -> Result<ContactSubmission, FormErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ContactSubmission {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
        })
    }

    /// Empties all fields.
    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }
}
