//! HTTP contact gateway - the contact dialog's link to `POST /api/contact`.

use async_trait::async_trait;
use std::time::Duration;

use super::http_chat_gateway::status_error;
use crate::domain::contact::ContactSubmission;
use crate::ports::{ContactGateway, GatewayError};

const CONTACT_TIMEOUT: Duration = Duration::from_secs(30);

/// Posts validated contact submissions to the relay.
pub struct HttpContactGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpContactGateway {
    /// Creates a gateway for the relay at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(CONTACT_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn contact_url(&self) -> String {
        format!("{}/api/contact", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ContactGateway for HttpContactGateway {
    async fn deliver(&self, submission: &ContactSubmission) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(self.contact_url())
            .json(submission)
            .send()
            .await
            .map_err(|e| GatewayError::transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_url_joins_base() {
        let gateway = HttpContactGateway::new("http://localhost:3000").unwrap();
        assert_eq!(gateway.contact_url(), "http://localhost:3000/api/contact");
    }
}
