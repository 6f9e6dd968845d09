use std::collections::BTreeMap;
use url::Url;

use crate::openid::config::OPENID_NS;
use crate::openid::errors::OpenIdError;
use crate::openid::types::{AssertionMode, AssertionResponse};
use crate::utils::{is_loopback_host, parse_key_value_form};

/// Fields Steam always sends with a positive assertion
pub(super) const REQUIRED_FIELDS: [&str; 6] = [
    "openid.ns",
    "openid.op_endpoint",
    "openid.claimed_id",
    "openid.return_to",
    "openid.signed",
    "openid.sig",
];

/// Fields that must be covered by the signature before we trust them
pub(super) const REQUIRED_SIGNED_FIELDS: [&str; 3] = ["op_endpoint", "claimed_id", "return_to"];

/// Steam IDs are 64-bit integers
const MAX_ID_DIGITS: usize = 20;

fn parse_absolute_url(input: &str, what: &str) -> Result<Url, OpenIdError> {
    let url = Url::parse(input)
        .map_err(|e| OpenIdError::Validation(format!("{what} {input:?} is not a URL: {e}")))?;

    let Some(host) = url.host_str() else {
        return Err(OpenIdError::Validation(format!("{what} {input:?} has no host")));
    };

    if url.fragment().is_some() {
        return Err(OpenIdError::Validation(format!(
            "{what} {input:?} must not contain a fragment"
        )));
    }

    match url.scheme() {
        "https" => {}
        "http" if is_loopback_host(host) => {}
        scheme => {
            return Err(OpenIdError::Validation(format!(
                "{what} {input:?} must use https, got {scheme}"
            )));
        }
    }

    Ok(url)
}

pub(super) fn validate_endpoint(endpoint: &str) -> Result<(), OpenIdError> {
    parse_absolute_url(endpoint, "provider endpoint").map(|_| ())
}

/// Checks both URLs and that the callback lies inside the realm.
pub(crate) fn validate_return_to(callback_url: &str, realm: &str) -> Result<(), OpenIdError> {
    let callback = parse_absolute_url(callback_url, "callback URL")?;
    let realm_url = parse_absolute_url(realm, "realm")?;

    if callback.scheme() != realm_url.scheme()
        || callback.port_or_known_default() != realm_url.port_or_known_default()
    {
        return Err(OpenIdError::Validation(format!(
            "callback URL {callback_url:?} does not match realm {realm:?}"
        )));
    }

    let callback_host = callback.host_str().unwrap_or_default();
    let realm_host = realm_url.host_str().unwrap_or_default();
    let host_matches = match realm_host.strip_prefix("*.") {
        Some(domain) => {
            callback_host == domain || callback_host.ends_with(&format!(".{domain}"))
        }
        None => callback_host == realm_host,
    };
    if !host_matches {
        return Err(OpenIdError::Validation(format!(
            "callback host {callback_host} is outside realm {realm:?}"
        )));
    }

    let realm_path = realm_url.path();
    let callback_path = callback.path();
    let path_matches = (realm_path.ends_with('/') && callback_path.starts_with(realm_path))
        || callback_path == realm_path
        || callback_path.starts_with(&format!("{realm_path}/"));
    if !path_matches {
        return Err(OpenIdError::Validation(format!(
            "callback path {callback_path} is outside realm {realm:?}"
        )));
    }

    Ok(())
}

/// Splits `openid.signed` into field names (without the "openid." prefix).
pub(super) fn signed_fields(signed: &str) -> Result<Vec<&str>, OpenIdError> {
    let fields: Vec<&str> = signed.split(',').collect();
    if fields.iter().any(|field| field.is_empty()) {
        return Err(OpenIdError::MalformedInput(format!(
            "malformed signed list {signed:?}"
        )));
    }
    Ok(fields)
}

/// Structural checks done before anything is sent to the provider.
pub(super) fn check_structure<'a>(
    response: &'a AssertionResponse,
) -> Result<Vec<&'a str>, OpenIdError> {
    let mode = response.require("openid.mode")?;
    match mode.parse::<AssertionMode>()? {
        AssertionMode::IdRes => {}
        other => {
            return Err(OpenIdError::AssertionRejected(format!(
                "not a positive assertion: mode {}",
                other.as_str()
            )));
        }
    }

    for key in REQUIRED_FIELDS {
        response.require(key)?;
    }

    let ns = response.require("openid.ns")?;
    if ns != OPENID_NS {
        return Err(OpenIdError::MalformedInput(format!(
            "unsupported namespace {ns:?}"
        )));
    }

    let signed = signed_fields(response.require("openid.signed")?)?;
    for field in REQUIRED_SIGNED_FIELDS {
        if !signed.contains(&field) {
            return Err(OpenIdError::MalformedInput(format!(
                "field {field} is not covered by the signature"
            )));
        }
    }
    for field in &signed {
        if response.get(&format!("openid.{field}")).is_none() {
            return Err(OpenIdError::MalformedInput(format!(
                "signed field {field} is missing"
            )));
        }
    }

    Ok(signed)
}

/// Form body for `check_authentication`: every `openid.*` field as received,
/// with the mode switched. Fields in the signed list must all be present.
pub(super) fn confirmation_form(
    response: &AssertionResponse,
    signed: &[&str],
) -> Result<Vec<(String, String)>, OpenIdError> {
    for field in signed {
        response.require(&format!("openid.{field}"))?;
    }

    let mut form: BTreeMap<String, String> = response
        .iter()
        .filter(|(key, _)| key.starts_with("openid."))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    form.insert(
        "openid.mode".to_string(),
        AssertionMode::CheckAuthentication.as_str().to_string(),
    );

    Ok(form.into_iter().collect())
}

/// True only if the reply carries exactly one `is_valid` line and it says `true`.
pub(super) fn reply_is_valid(body: &str) -> Result<bool, OpenIdError> {
    let pairs = parse_key_value_form(body)?;
    let verdicts: Vec<&str> = pairs
        .iter()
        .filter(|(key, _)| *key == "is_valid")
        .map(|(_, value)| *value)
        .collect();
    Ok(verdicts == ["true"])
}

/// Returns the numeric ID at the end of a claimed identifier URL.
pub(super) fn extract_identifier<'a>(
    claimed_id: &'a str,
    prefix: &str,
) -> Result<&'a str, OpenIdError> {
    let id = claimed_id.strip_prefix(prefix).ok_or_else(|| {
        OpenIdError::IdentityFormatMismatch(format!(
            "claimed identifier {claimed_id:?} does not start with {prefix:?}"
        ))
    })?;

    if id.is_empty() || id.len() > MAX_ID_DIGITS || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(OpenIdError::IdentityFormatMismatch(format!(
            "claimed identifier {claimed_id:?} does not end in a numeric ID"
        )));
    }

    Ok(id)
}
