use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::errors::OpenIdError;

/// Value of `openid.mode`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertionMode {
    CheckidSetup,
    CheckidImmediate,
    IdRes,
    SetupNeeded,
    Cancel,
    CheckAuthentication,
}

impl AssertionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckidSetup => "checkid_setup",
            Self::CheckidImmediate => "checkid_immediate",
            Self::IdRes => "id_res",
            Self::SetupNeeded => "setup_needed",
            Self::Cancel => "cancel",
            Self::CheckAuthentication => "check_authentication",
        }
    }
}

impl std::str::FromStr for AssertionMode {
    type Err = OpenIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checkid_setup" => Ok(Self::CheckidSetup),
            "checkid_immediate" => Ok(Self::CheckidImmediate),
            "id_res" => Ok(Self::IdRes),
            "setup_needed" => Ok(Self::SetupNeeded),
            "cancel" => Ok(Self::Cancel),
            "check_authentication" => Ok(Self::CheckAuthentication),
            _ => Err(OpenIdError::MalformedInput(format!("unknown mode {s:?}"))),
        }
    }
}

/// Inputs of one sign-in attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequestParams {
    pub provider_endpoint: String,
    pub return_to: String,
    pub realm: String,
    pub mode: AssertionMode,
}

/// A ready-to-use redirect to the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequest {
    pub url: String,
    pub params: AuthRequestParams,
}

/// Query parameters Steam appended to the callback URL.
///
/// Untrusted input: nothing in here is believed until the provider confirms it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssertionResponse(BTreeMap<String, String>);

impl AssertionResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a response from raw query pairs, keeping the first value of a repeated key.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields = BTreeMap::new();
        for (key, value) in pairs {
            fields.entry(key.into()).or_insert_with(|| value.into());
        }
        Self(fields)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Non-empty value of `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub(crate) fn require(&self, key: &str) -> Result<&str, OpenIdError> {
        self.get(key)
            .ok_or_else(|| OpenIdError::MalformedInput(format!("missing field {key}")))
    }

    /// Every field as received, in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AssertionResponse {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

/// A Steam ID the provider has vouched for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerifiedIdentity(String);

impl VerifiedIdentity {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for VerifiedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
