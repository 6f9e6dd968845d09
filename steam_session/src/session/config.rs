use std::{env, fmt};

use crate::session::errors::SessionError;

/// Lifetime of a session token: 30 days
pub const SESSION_TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Shorter secrets are accepted but logged as weak
const MIN_RECOMMENDED_SECRET_LEN: usize = 32;

/// Signing secret for session tokens.
///
/// Changing the secret invalidates every token issued with the old one.
#[derive(Clone)]
pub struct SessionConfig {
    secret: Vec<u8>,
}

impl SessionConfig {
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, SessionError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(SessionError::Config(
                "session signing secret must not be empty".to_string(),
            ));
        }
        if secret.len() < MIN_RECOMMENDED_SECRET_LEN {
            tracing::warn!(
                "Session signing secret is only {} bytes; use at least {}",
                secret.len(),
                MIN_RECOMMENDED_SECRET_LEN
            );
        }
        Ok(Self { secret })
    }

    /// Reads `JWT_SECRET`
    pub fn from_env() -> Result<Self, SessionError> {
        let secret = env::var("JWT_SECRET")
            .map_err(|_| SessionError::Config("JWT_SECRET must be set".to_string()))?;
        Self::new(secret)
    }

    pub(super) fn secret(&self) -> &[u8] {
        &self.secret
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"<redacted>")
            .finish()
    }
}
