//! steam_session - Steam OpenID sign-in and stateless session tokens
//!
//! This crate verifies OpenID 2.0 positive assertions returned by Steam and
//! exchanges a verified Steam ID for a signed, expiring bearer token that can be
//! checked on every protected request without server-side session storage.

mod config;
mod coordination;
mod openid;
mod session;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::{ORIGIN, STEAM_ROUTE_PREFIX};

pub use coordination::{
    CoordinationError, SteamLogin, authenticate_bearer, authenticate_bearer_core,
    authenticate_token, authenticate_token_core, complete_steam_login, complete_steam_login_core,
    prepare_steam_login, prepare_steam_login_core,
};

pub use openid::{
    AssertionMode, AssertionResponse, AssertionVerifier, AuthRequest, AuthRequestParams,
    ConfirmationReply, ConfirmationTransport, OpenIdError, ReqwestTransport, VerifiedIdentity,
    VerifierConfig,
};

pub use session::{
    CredentialService, SESSION_TOKEN_TTL_SECS, SessionConfig, SessionError, SessionPayload,
    bearer_token_from_headers, extract_bearer,
};

/// Initialize the Steam sign-in layer
///
/// Forces the process-wide verifier and credential service to be built so that
/// a missing `JWT_SECRET` or a malformed endpoint fails at start-up instead of on
/// the first login.
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    openid::init()?;
    session::init()?;
    tracing::info!(
        "Steam sign-in initialized: origin={}, prefix={}",
        ORIGIN.as_str(),
        STEAM_ROUTE_PREFIX.as_str()
    );
    Ok(())
}
