use std::{env, sync::LazyLock, time::Duration};

use crate::config::{ORIGIN, STEAM_ROUTE_PREFIX};

/// OpenID 2.0 namespace sent with every request
pub(crate) const OPENID_NS: &str = "http://specs.openid.net/auth/2.0";

/// Lets the provider choose the identifier for the user
pub(crate) const IDENTIFIER_SELECT: &str = "http://specs.openid.net/auth/2.0/identifier_select";

const DEFAULT_PROVIDER_ENDPOINT: &str = "https://steamcommunity.com/openid/login";
const DEFAULT_IDENTITY_PREFIX: &str = "https://steamcommunity.com/openid/id/";
const DEFAULT_TIMEOUT_SECS: u64 = 5;

pub(super) static STEAM_OPENID_ENDPOINT: LazyLock<String> = LazyLock::new(|| {
    env::var("STEAM_OPENID_ENDPOINT").unwrap_or_else(|_| DEFAULT_PROVIDER_ENDPOINT.to_string())
});

pub(super) static STEAM_OPENID_IDENTITY_PREFIX: LazyLock<String> = LazyLock::new(|| {
    env::var("STEAM_OPENID_IDENTITY_PREFIX")
        .unwrap_or_else(|_| DEFAULT_IDENTITY_PREFIX.to_string())
});

pub(super) static STEAM_OPENID_TIMEOUT_SECS: LazyLock<u64> = LazyLock::new(|| {
    env::var("STEAM_OPENID_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
});

/// Where Steam sends the user back after sign-in
pub(crate) static STEAM_CALLBACK_URL: LazyLock<String> = LazyLock::new(|| {
    format!(
        "{}{}/auth/steam-callback",
        ORIGIN.as_str(),
        STEAM_ROUTE_PREFIX.as_str()
    )
});

pub(crate) static STEAM_REALM: LazyLock<String> = LazyLock::new(|| ORIGIN.to_string());

/// Settings that pin the verifier to one known provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierConfig {
    /// The only endpoint confirmation requests are ever sent to
    pub provider_endpoint: String,
    /// Claimed identifiers must be this prefix followed by a numeric ID
    pub identity_prefix: String,
    /// Upper bound for the confirmation round-trip
    pub timeout: Duration,
    /// When set, `openid.return_to` must equal it exactly
    pub expected_return_to: Option<String>,
}

impl VerifierConfig {
    pub fn from_env() -> Self {
        Self {
            provider_endpoint: STEAM_OPENID_ENDPOINT.to_string(),
            identity_prefix: STEAM_OPENID_IDENTITY_PREFIX.to_string(),
            timeout: Duration::from_secs(*STEAM_OPENID_TIMEOUT_SECS),
            expected_return_to: Some(STEAM_CALLBACK_URL.to_string()),
        }
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            provider_endpoint: DEFAULT_PROVIDER_ENDPOINT.to_string(),
            identity_prefix: DEFAULT_IDENTITY_PREFIX.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            expected_return_to: None,
        }
    }
}
