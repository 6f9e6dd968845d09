use http::header::{AUTHORIZATION, HeaderMap};

const BEARER_PREFIX: &str = "Bearer ";

/// Token part of an `Authorization: Bearer <token>` header value.
///
/// The prefix is case-sensitive and an empty token is rejected.
pub fn extract_bearer(header_value: Option<&str>) -> Option<&str> {
    header_value?
        .strip_prefix(BEARER_PREFIX)
        .filter(|token| !token.is_empty())
}

/// Bearer token from the request's `Authorization` header, if any
pub fn bearer_token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok();
    extract_bearer(value)
}
