//! Settings for the axum integration

use std::sync::LazyLock;

const DEFAULT_APP_REDIRECT_URL: &str = "com.wntp://auth";

/// Deep link the result pages send the client back to
/// Default: "com.wntp://auth"
pub static STEAM_APP_REDIRECT_URL: LazyLock<String> = LazyLock::new(|| {
    app_redirect_url(std::env::var("STEAM_APP_REDIRECT_URL").ok().as_deref())
});

fn app_redirect_url(env_value: Option<&str>) -> String {
    env_value
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_APP_REDIRECT_URL)
        .to_string()
}
