use async_trait::async_trait;
use std::time::Duration;

use crate::openid::errors::OpenIdError;

/// Raw reply of the provider to a `check_authentication` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationReply {
    pub status: u16,
    pub body: String,
}

/// Sends the server-to-server confirmation request.
///
/// Implementations must not retry: a failed call is a failed sign-in.
#[async_trait]
pub trait ConfirmationTransport: Send + Sync {
    async fn confirm(
        &self,
        endpoint: &str,
        form: &[(String, String)],
    ) -> Result<ConfirmationReply, OpenIdError>;
}

/// Confirmation over HTTPS with a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, OpenIdError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| OpenIdError::Internal(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ConfirmationTransport for ReqwestTransport {
    async fn confirm(
        &self,
        endpoint: &str,
        form: &[(String, String)],
    ) -> Result<ConfirmationReply, OpenIdError> {
        let response = self
            .client
            .post(endpoint)
            .form(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Confirmation request to {} failed: {}", endpoint, e);
                OpenIdError::AssertionRejected(format!("confirmation request failed: {e}"))
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            OpenIdError::AssertionRejected(format!("failed to read confirmation reply: {e}"))
        })?;

        tracing::debug!("Confirmation reply status: {}", status);
        Ok(ConfirmationReply { status, body })
    }
}
