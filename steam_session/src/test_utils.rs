//! Shared helpers for unit tests across the crate

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::openid::{AssertionResponse, ConfirmationReply, ConfirmationTransport, OpenIdError};

/// Transport that answers every confirmation with the same reply
pub(crate) struct FixedReplyTransport {
    status: u16,
    body: &'static str,
    calls: AtomicUsize,
}

impl FixedReplyTransport {
    pub(crate) fn new(status: u16, body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body,
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfirmationTransport for FixedReplyTransport {
    async fn confirm(
        &self,
        _endpoint: &str,
        _form: &[(String, String)],
    ) -> Result<ConfirmationReply, OpenIdError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ConfirmationReply {
            status: self.status,
            body: self.body.to_string(),
        })
    }
}

/// A well-formed Steam positive assertion for `steam_id`
pub(crate) fn positive_assertion(steam_id: &str) -> AssertionResponse {
    let claimed = format!("https://steamcommunity.com/openid/id/{steam_id}");
    AssertionResponse::from_pairs([
        ("openid.ns", "http://specs.openid.net/auth/2.0"),
        ("openid.mode", "id_res"),
        ("openid.op_endpoint", "https://steamcommunity.com/openid/login"),
        ("openid.claimed_id", claimed.as_str()),
        ("openid.identity", claimed.as_str()),
        ("openid.return_to", "https://app.example/api/auth/steam-callback"),
        ("openid.response_nonce", "2025-01-01T00:00:00Zq9yHN7PHSYdNYmPKYq0qz4I0DbU="),
        ("openid.assoc_handle", "1234567890"),
        (
            "openid.signed",
            "signed,op_endpoint,claimed_id,identity,return_to,response_nonce,assoc_handle",
        ),
        ("openid.sig", "k0ZxUqGXN1kl5gWwi/UBy0TWv6s="),
    ])
}
