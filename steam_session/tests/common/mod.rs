pub mod mock_provider;

pub use mock_provider::{MockProvider, ReplyMode};

use steam_session::{CredentialService, SessionConfig};

pub const STEAM_ID: &str = "76561198012345678";

pub fn credentials() -> CredentialService {
    CredentialService::new(
        &SessionConfig::new("integration-test-secret-0123456789abcdef").expect("valid secret"),
    )
}
