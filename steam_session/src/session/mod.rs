mod config;
mod errors;
mod main;
mod types;

pub use config::{SESSION_TOKEN_TTL_SECS, SessionConfig};
pub use errors::SessionError;
pub use main::{CredentialService, bearer_token_from_headers, extract_bearer};
pub use types::SessionPayload;

pub(crate) use main::credential_service;

pub(crate) fn init() -> Result<(), SessionError> {
    // Fails here if JWT_SECRET is missing
    credential_service()?;
    Ok(())
}
