use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a valid session token says about its bearer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    /// Steam ID the token was minted for
    pub subject: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// JWT claims as they travel on the wire
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct SessionClaims {
    pub(super) sub: String,
    pub(super) iat: i64,
    pub(super) exp: i64,
}
