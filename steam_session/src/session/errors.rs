use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Bad signature, wrong algorithm, or a token that does not decode
    #[error("Invalid token: {0}")]
    TokenInvalid(String),

    /// Signature is fine but the token is past its expiry
    #[error("Token expired")]
    TokenExpired,

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
