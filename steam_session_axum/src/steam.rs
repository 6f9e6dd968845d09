use axum::{
    Json, Router,
    extract::Query,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::json;

use steam_session::{
    AssertionResponse, CoordinationError, complete_steam_login_core, prepare_steam_login_core,
};

use super::error::IntoResponseError;
use super::pages::SignInOutcome;

pub(super) fn router() -> Router {
    Router::new()
        .route("/steam-login", get(steam_login))
        .route("/steam-callback", get(steam_callback))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SteamLoginResponse {
    auth_url: String,
    message: &'static str,
}

/// Hands the client the Steam URL to open in a browser
async fn steam_login() -> Response {
    match prepare_steam_login_core().into_response_error() {
        Ok(auth_url) => Json(SteamLoginResponse {
            auth_url,
            message: "Redirect user to this URL to authenticate with Steam",
        })
        .into_response(),
        Err((status, _)) => (
            status,
            Json(json!({ "error": "Failed to generate authentication URL" })),
        )
            .into_response(),
    }
}

/// Where Steam sends the browser back after sign-in
///
/// Repeated query keys keep their first value.
async fn steam_callback(Query(pairs): Query<Vec<(String, String)>>) -> SignInOutcome {
    let params = AssertionResponse::from_pairs(pairs);

    match complete_steam_login_core(&params).await {
        Ok(login) => SignInOutcome::Success {
            token: login.token,
            steam_id: login.steam_id,
        },
        Err(CoordinationError::Unauthorized) => SignInOutcome::VerificationFailed,
        Err(e) => {
            tracing::error!("Steam callback failed: {}", e);
            SignInOutcome::ServerError
        }
    }
}
