//! Central configuration for the steam_session crate

use std::sync::LazyLock;

/// Route prefix under which the sign-in endpoints are mounted
///
/// Default: "/api"
pub static STEAM_ROUTE_PREFIX: LazyLock<String> = LazyLock::new(|| {
    std::env::var("STEAM_ROUTE_PREFIX").unwrap_or_else(|_| "/api".to_string())
});

/// Public origin of this service, used as the OpenID realm
///
/// Default: "http://localhost:3000"
pub static ORIGIN: LazyLock<String> = LazyLock::new(|| {
    std::env::var("ORIGIN")
        .map(|origin| origin.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| "http://localhost:3000".to_string())
});
