use crate::openid::{
    AssertionResponse, AssertionVerifier, STEAM_CALLBACK_URL, STEAM_REALM, steam_verifier,
};
use crate::session::{CredentialService, SessionPayload, credential_service, extract_bearer};

use super::errors::CoordinationError;

/// Result of a completed Steam sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteamLogin {
    pub steam_id: String,
    pub token: String,
}

/// Provider URL the client should open to start signing in
pub fn prepare_steam_login(
    verifier: &AssertionVerifier,
    callback_url: &str,
    realm: &str,
) -> Result<String, CoordinationError> {
    let request = verifier.build_auth_request(callback_url, realm)?;
    Ok(request.url)
}

/// Verifies the callback and, only on success, mints a session token.
pub async fn complete_steam_login(
    verifier: &AssertionVerifier,
    credentials: &CredentialService,
    params: &AssertionResponse,
) -> Result<SteamLogin, CoordinationError> {
    let identity = verifier
        .verify_assertion(params)
        .await
        .ok_or(CoordinationError::Unauthorized)?;

    let token = credentials.mint(&identity)?;
    tracing::info!("Steam sign-in completed for {}", identity);

    Ok(SteamLogin {
        steam_id: identity.into_inner(),
        token,
    })
}

/// Session behind an `Authorization` header value
pub fn authenticate_bearer(
    credentials: &CredentialService,
    authorization: Option<&str>,
) -> Result<SessionPayload, CoordinationError> {
    let Some(token) = extract_bearer(authorization) else {
        tracing::debug!("No bearer token presented");
        return Err(CoordinationError::Unauthorized);
    };

    authenticate_token(credentials, token)
}

/// Session behind a bare token, already taken out of its header
pub fn authenticate_token(
    credentials: &CredentialService,
    token: &str,
) -> Result<SessionPayload, CoordinationError> {
    credentials
        .validate(token)
        .ok_or(CoordinationError::Unauthorized)
}

/// [`prepare_steam_login`] with the configured callback URL and realm
pub fn prepare_steam_login_core() -> Result<String, CoordinationError> {
    prepare_steam_login(steam_verifier()?, &STEAM_CALLBACK_URL, &STEAM_REALM)
}

/// [`complete_steam_login`] with the process-wide verifier and secret
pub async fn complete_steam_login_core(
    params: &AssertionResponse,
) -> Result<SteamLogin, CoordinationError> {
    complete_steam_login(steam_verifier()?, credential_service()?, params).await
}

/// [`authenticate_bearer`] with the process-wide secret
pub fn authenticate_bearer_core(
    authorization: Option<&str>,
) -> Result<SessionPayload, CoordinationError> {
    authenticate_bearer(credential_service()?, authorization)
}

/// [`authenticate_token`] with the process-wide secret
pub fn authenticate_token_core(token: &str) -> Result<SessionPayload, CoordinationError> {
    authenticate_token(credential_service()?, token)
}
