//! HTTP handler for the contact relay.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::chat::ErrorBody;
use crate::application::handlers::{SendContactError, SendContactHandler};

use super::dto::{ContactRequest, ContactResponse};

/// Shared state for the contact endpoint.
#[derive(Clone)]
pub struct ContactAppState {
    pub sender: Arc<SendContactHandler>,
}

impl ContactAppState {
    pub fn new(sender: Arc<SendContactHandler>) -> Self {
        Self { sender }
    }
}

/// POST /api/contact - Email a contact form to the site owner.
///
/// # Errors
/// - 400 Bad Request: malformed body or invalid field
/// - 500 Internal Server Error: mail delivery failed
pub async fn post_contact(
    State(state): State<ContactAppState>,
    body: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ContactApiError> {
    let Json(request) =
        body.map_err(|_| ContactApiError::BadRequest("Invalid request body".to_string()))?;

    state
        .sender
        .handle(request.into())
        .await
        .map_err(ContactApiError::from)?;

    Ok((StatusCode::OK, Json(ContactResponse { success: true })))
}

/// API error type that converts contact errors to HTTP responses.
#[derive(Debug)]
pub enum ContactApiError {
    BadRequest(String),
    Internal(String),
}

impl From<SendContactError> for ContactApiError {
    fn from(err: SendContactError) -> Self {
        match err {
            SendContactError::Invalid(e) => ContactApiError::BadRequest(e.to_string()),
            SendContactError::Delivery(e) => ContactApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ContactApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ContactApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg)),
            ContactApiError::Internal(msg) => {
                tracing::error!("Contact error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Failed to send message"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}
