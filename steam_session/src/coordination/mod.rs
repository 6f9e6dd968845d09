mod errors;
mod steam;

pub use errors::CoordinationError;
pub use steam::{
    SteamLogin, authenticate_bearer, authenticate_bearer_core, authenticate_token,
    authenticate_token_core, complete_steam_login, complete_steam_login_core, prepare_steam_login,
    prepare_steam_login_core,
};
