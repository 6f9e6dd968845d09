mod config;
mod errors;
mod main;
mod types;

pub use config::VerifierConfig;
pub use errors::OpenIdError;
pub use main::{AssertionVerifier, ConfirmationReply, ConfirmationTransport, ReqwestTransport};
pub use types::{AssertionMode, AssertionResponse, AuthRequest, AuthRequestParams, VerifiedIdentity};

pub(crate) use config::{STEAM_CALLBACK_URL, STEAM_REALM};
pub(crate) use main::steam_verifier;

use main::validate_return_to;

pub(crate) fn init() -> Result<(), OpenIdError> {
    // Validate configuration early
    steam_verifier()?;
    validate_return_to(&STEAM_CALLBACK_URL, &STEAM_REALM)
}
