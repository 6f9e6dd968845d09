use thiserror::Error;

/// Parse an OpenID key-value form document ("key:value" per line).
///
/// Blank lines are skipped and a trailing "\r" is tolerated. A non-blank line
/// without a colon makes the whole document invalid.
pub(crate) fn parse_key_value_form(body: &str) -> Result<Vec<(&str, &str)>, UtilError> {
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.split_once(':')
                .ok_or_else(|| UtilError::Format(format!("missing ':' in line {line:?}")))
        })
        .collect()
}

/// Loopback hosts may use plain http for local development.
pub(crate) fn is_loopback_host(host: &str) -> bool {
    matches!(host, "localhost" | "127.0.0.1" | "[::1]" | "::1")
}

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Invalid format: {0}")]
    Format(String),
}
