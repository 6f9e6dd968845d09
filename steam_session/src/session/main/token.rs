use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::sync::LazyLock;

use crate::openid::VerifiedIdentity;
use crate::session::config::{SESSION_TOKEN_TTL_SECS, SessionConfig};
use crate::session::errors::SessionError;
use crate::session::types::{SessionClaims, SessionPayload};

static CREDENTIAL_SERVICE: LazyLock<Result<CredentialService, SessionError>> =
    LazyLock::new(|| SessionConfig::from_env().map(|config| CredentialService::new(&config)));

/// Process-wide credential service keyed with `JWT_SECRET`
pub(crate) fn credential_service() -> Result<&'static CredentialService, SessionError> {
    CREDENTIAL_SERVICE.as_ref().map_err(Clone::clone)
}

/// Mints and checks HS256 session tokens.
///
/// Stateless: any instance holding the same secret accepts the same tokens.
#[derive(Clone)]
pub struct CredentialService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl CredentialService {
    pub fn new(config: &SessionConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared against the caller's clock in validate_checked_at
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret()),
            decoding_key: DecodingKey::from_secret(config.secret()),
            validation,
        }
    }

    /// Token for `identity`, valid for 30 days from now
    pub fn mint(&self, identity: &VerifiedIdentity) -> Result<String, SessionError> {
        self.mint_at(identity, Utc::now())
    }

    pub fn mint_at(
        &self,
        identity: &VerifiedIdentity,
        now: DateTime<Utc>,
    ) -> Result<String, SessionError> {
        let iat = now.timestamp();
        let claims = SessionClaims {
            sub: identity.as_str().to_string(),
            iat,
            exp: iat + SESSION_TOKEN_TTL_SECS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| SessionError::Crypto(format!("Failed to sign session token: {e}")))
    }

    /// The token's payload, or `None` if it is forged, corrupted or expired
    pub fn validate(&self, token: &str) -> Option<SessionPayload> {
        self.validate_at(token, Utc::now())
    }

    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Option<SessionPayload> {
        match self.validate_checked_at(token, now) {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::debug!("Session token rejected: {}", e);
                None
            }
        }
    }

    pub fn validate_checked_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionPayload, SessionError> {
        let claims = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| SessionError::TokenInvalid(e.to_string()))?
            .claims;

        if claims.sub.is_empty() {
            return Err(SessionError::TokenInvalid("empty subject".to_string()));
        }
        if claims.exp.checked_sub(claims.iat) != Some(SESSION_TOKEN_TTL_SECS) {
            return Err(SessionError::TokenInvalid(
                "unexpected token lifetime".to_string(),
            ));
        }
        if now.timestamp() >= claims.exp {
            return Err(SessionError::TokenExpired);
        }

        let issued_at = DateTime::from_timestamp(claims.iat, 0)
            .ok_or_else(|| SessionError::TokenInvalid("iat out of range".to_string()))?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| SessionError::TokenInvalid("exp out of range".to_string()))?;

        Ok(SessionPayload {
            subject: claims.sub,
            issued_at,
            expires_at,
        })
    }
}
