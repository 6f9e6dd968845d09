//! Error types for the coordination layer

use thiserror::Error;

use crate::openid::OpenIdError;
use crate::session::SessionError;

/// Errors surfaced to the HTTP layer.
///
/// `Unauthorized` covers every failed sign-in or rejected token; the other
/// variants are server-side problems such as missing configuration.
#[derive(Error, Debug)]
pub enum CoordinationError {
    /// Authentication failed; deliberately carries no reason
    #[error("Unauthorized access")]
    Unauthorized,

    /// Error from OpenID operations
    #[error("OpenID error: {0}")]
    OpenIdError(#[from] OpenIdError),

    /// Error from session token operations
    #[error("Session error: {0}")]
    SessionError(#[from] SessionError),
}
