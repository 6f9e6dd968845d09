mod core;
mod transport;
mod utils;

pub use core::AssertionVerifier;
pub use transport::{ConfirmationReply, ConfirmationTransport, ReqwestTransport};

pub(crate) use core::steam_verifier;
pub(crate) use utils::validate_return_to;
