//! HTTP DTOs for the contact relay.

use serde::{Deserialize, Serialize};

use crate::domain::contact::ContactForm;

/// Body of `POST /api/contact`. Missing fields read as empty and fail
/// validation downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl From<ContactRequest> for ContactForm {
    fn from(request: ContactRequest) -> Self {
        ContactForm::new(request.name, request.email, request.message)
    }
}

/// Successful delivery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactResponse {
    pub success: bool,
}
