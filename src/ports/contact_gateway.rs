//! Contact Gateway Port - client-side dispatch of a validated contact form.

use async_trait::async_trait;

use crate::domain::contact::ContactSubmission;

use super::GatewayError;

/// Port for delivering a contact submission from the browser side.
///
/// Implementations may post to this service's `/api/contact` relay or call a
/// mail widget directly.
#[async_trait]
pub trait ContactGateway: Send + Sync {
    /// Dispatches the submission.
    async fn deliver(&self, submission: &ContactSubmission) -> Result<(), GatewayError>;
}
