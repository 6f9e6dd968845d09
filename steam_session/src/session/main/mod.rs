mod bearer;
mod token;

pub use bearer::{bearer_token_from_headers, extract_bearer};
pub use token::CredentialService;

pub(crate) use token::credential_service;
