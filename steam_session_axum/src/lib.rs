mod config;
mod error;
mod middleware;
mod pages;
mod router;
mod session;
mod steam;

#[cfg(test)]
mod test_utils;

pub use config::STEAM_APP_REDIRECT_URL;
pub use error::IntoResponseError;
pub use middleware::is_authenticated_401;
pub use router::{steam_session_router, steam_session_router_no_trace};
pub use session::{AuthError, AuthUser};

// Re-export the route prefix and initialization function from steam_session crate
pub use steam_session::{STEAM_ROUTE_PREFIX, init};
