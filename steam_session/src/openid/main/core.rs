use std::sync::{Arc, LazyLock};
use tokio::time::timeout;
use url::Url;

use crate::openid::config::{IDENTIFIER_SELECT, OPENID_NS, VerifierConfig};
use crate::openid::errors::OpenIdError;
use crate::openid::types::{
    AssertionMode, AssertionResponse, AuthRequest, AuthRequestParams, VerifiedIdentity,
};

use super::transport::{ConfirmationTransport, ReqwestTransport};
use super::utils::{
    check_structure, confirmation_form, extract_identifier, reply_is_valid, validate_endpoint,
    validate_return_to,
};

static STEAM_VERIFIER: LazyLock<Result<AssertionVerifier, OpenIdError>> =
    LazyLock::new(|| AssertionVerifier::new(VerifierConfig::from_env()));

/// Process-wide verifier built from the environment
pub(crate) fn steam_verifier() -> Result<&'static AssertionVerifier, OpenIdError> {
    STEAM_VERIFIER.as_ref().map_err(Clone::clone)
}

/// Builds sign-in redirects and verifies what comes back.
///
/// Holds no per-request state; one instance serves every request.
#[derive(Clone)]
pub struct AssertionVerifier {
    config: VerifierConfig,
    transport: Arc<dyn ConfirmationTransport>,
}

impl AssertionVerifier {
    /// Verifier that confirms assertions over HTTPS
    pub fn new(config: VerifierConfig) -> Result<Self, OpenIdError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Self::with_transport(config, Arc::new(transport))
    }

    pub fn with_transport(
        config: VerifierConfig,
        transport: Arc<dyn ConfirmationTransport>,
    ) -> Result<Self, OpenIdError> {
        validate_endpoint(&config.provider_endpoint)?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Builds the URL that starts a `checkid_setup` sign-in at the provider.
    ///
    /// `callback_url` and `realm` are copied into the query verbatim.
    pub fn build_auth_request(
        &self,
        callback_url: &str,
        realm: &str,
    ) -> Result<AuthRequest, OpenIdError> {
        validate_return_to(callback_url, realm)?;

        let params = AuthRequestParams {
            provider_endpoint: self.config.provider_endpoint.clone(),
            return_to: callback_url.to_string(),
            realm: realm.to_string(),
            mode: AssertionMode::CheckidSetup,
        };

        let url = Url::parse_with_params(
            &params.provider_endpoint,
            &[
                ("openid.ns", OPENID_NS),
                ("openid.mode", params.mode.as_str()),
                ("openid.return_to", params.return_to.as_str()),
                ("openid.realm", params.realm.as_str()),
                ("openid.identity", IDENTIFIER_SELECT),
                ("openid.claimed_id", IDENTIFIER_SELECT),
            ],
        )
        .map_err(|e| OpenIdError::Validation(format!("Failed to build auth URL: {e}")))?;

        tracing::debug!("Auth request built for return_to {}", params.return_to);
        Ok(AuthRequest {
            url: url.to_string(),
            params,
        })
    }

    /// Verifies a callback and returns the Steam ID, or `None` if anything is off.
    ///
    /// `None` always means "authentication failed"; the reason is logged.
    pub async fn verify_assertion(&self, response: &AssertionResponse) -> Option<VerifiedIdentity> {
        match self.verify_assertion_checked(response).await {
            Ok(identity) => {
                tracing::debug!("Steam assertion verified for {}", identity);
                Some(identity)
            }
            Err(e) => {
                tracing::warn!("Steam assertion verification failed: {}", e);
                None
            }
        }
    }

    /// Same as [`verify_assertion`](Self::verify_assertion) but keeps the failure reason.
    pub async fn verify_assertion_checked(
        &self,
        response: &AssertionResponse,
    ) -> Result<VerifiedIdentity, OpenIdError> {
        let signed = check_structure(response)?;

        let op_endpoint = response.require("openid.op_endpoint")?;
        if op_endpoint != self.config.provider_endpoint {
            return Err(OpenIdError::AssertionRejected(format!(
                "op_endpoint {op_endpoint:?} is not the pinned provider endpoint"
            )));
        }

        if let Some(expected) = &self.config.expected_return_to {
            let return_to = response.require("openid.return_to")?;
            if return_to != expected {
                return Err(OpenIdError::AssertionRejected(format!(
                    "return_to {return_to:?} does not match {expected:?}"
                )));
            }
        }

        let claimed_id = response.require("openid.claimed_id")?;
        if let Some(identity) = response.get("openid.identity") {
            if identity != claimed_id {
                return Err(OpenIdError::MalformedInput(
                    "identity and claimed_id differ".to_string(),
                ));
            }
        }

        let form = confirmation_form(response, &signed)?;
        let reply = timeout(
            self.config.timeout,
            self.transport
                .confirm(&self.config.provider_endpoint, &form),
        )
        .await
        .map_err(|_| {
            OpenIdError::AssertionRejected(format!(
                "confirmation timed out after {:?}",
                self.config.timeout
            ))
        })??;

        if reply.status != 200 {
            return Err(OpenIdError::AssertionRejected(format!(
                "provider answered confirmation with status {}",
                reply.status
            )));
        }

        let is_valid = reply_is_valid(&reply.body).map_err(|e| {
            OpenIdError::AssertionRejected(format!("unreadable confirmation reply: {e}"))
        })?;
        if !is_valid {
            return Err(OpenIdError::AssertionRejected(
                "provider did not confirm the assertion".to_string(),
            ));
        }

        let steam_id = extract_identifier(claimed_id, &self.config.identity_prefix)?;
        Ok(VerifiedIdentity::new(steam_id))
    }
}
