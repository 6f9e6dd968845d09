//! Test utilities shared by the unit tests of this crate
//!
//! The library reads its secret from the process environment once, so every
//! test that reaches the process-wide services calls [`init_test_env`] first.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use std::sync::LazyLock;

use steam_session::SESSION_TOKEN_TTL_SECS;

pub(crate) const TEST_SECRET: &str = "steam-session-axum-test-secret-0123456789";
pub(crate) const STEAM_ID: &str = "76561198000000042";

static ENV_INIT: LazyLock<()> = LazyLock::new(|| {
    // SAFETY: runs once, before any test reads the environment through the library
    unsafe {
        std::env::set_var("JWT_SECRET", TEST_SECRET);
    }
});

pub(crate) fn init_test_env() {
    LazyLock::force(&ENV_INIT);
}

/// Session token for `steam_id` issued at `issued_at`, signed with [`TEST_SECRET`]
pub(crate) fn mint_token(steam_id: &str, issued_at: DateTime<Utc>) -> String {
    let iat = issued_at.timestamp();
    let claims = json!({
        "sub": steam_id,
        "iat": iat,
        "exp": iat + SESSION_TOKEN_TTL_SECS,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("token encodes")
}
