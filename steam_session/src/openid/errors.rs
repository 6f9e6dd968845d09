use crate::utils::UtilError;
use thiserror::Error;

/// Reasons a sign-in attempt fails.
///
/// Every variant means "authentication failed" to the end user; the detail
/// is for logs only.
#[derive(Debug, Error, Clone)]
pub enum OpenIdError {
    /// Bad callback URL or realm when building the request
    #[error("Validation error: {0}")]
    Validation(String),

    /// Required fields missing or ill-formed; nothing was sent to the provider
    #[error("Malformed assertion: {0}")]
    MalformedInput(String),

    /// Negative assertion, provider said invalid, or the round-trip failed
    #[error("Assertion rejected: {0}")]
    AssertionRejected(String),

    /// Provider confirmed the assertion but the identifier is not a Steam ID URL
    #[error("Identity format mismatch: {0}")]
    IdentityFormatMismatch(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}
