use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::LazyLock;

use steam_session_axum::{AuthUser, STEAM_ROUTE_PREFIX};

const OWNED_GAMES_URL: &str = "https://api.steampowered.com/IPlayerService/GetOwnedGames/v1/";
const APP_DETAILS_URL: &str = "https://store.steampowered.com/api/appdetails";
const APP_REVIEWS_URL: &str = "https://store.steampowered.com/appreviews";

/// Web API key for the owned-games endpoint; that endpoint answers 500 without it
static STEAM_API_KEY: LazyLock<Option<String>> =
    LazyLock::new(|| api_key_from(std::env::var("STEAM_API_KEY").ok()));

fn api_key_from(env_value: Option<String>) -> Option<String> {
    env_value.filter(|key| !key.trim().is_empty())
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AppIdQuery {
    #[serde(rename = "appId")]
    app_id: Option<String>,
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Store app IDs are numeric; anything else is refused before it reaches a URL
fn require_app_id(query: &AppIdQuery) -> Result<&str, Response> {
    match query.app_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) => Ok(id),
        Some(id) if !id.is_empty() => Err(json_error(
            StatusCode::BAD_REQUEST,
            "appId parameter must be numeric",
        )),
        _ => Err(json_error(
            StatusCode::BAD_REQUEST,
            "appId parameter is required",
        )),
    }
}

/// Sends `request` and relays the upstream JSON, or its failure status
async fn proxy_json(request: reqwest::RequestBuilder, upstream: &str, failure: &str) -> Response {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("{} unreachable: {}", upstream, e);
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, failure);
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::error!("{} error: {}", upstream, status);
        return (
            status,
            Json(json!({
                "error": format!("{upstream} request failed"),
                "details": status.canonical_reason().unwrap_or_default(),
            })),
        )
            .into_response();
    }

    match response.json::<Value>().await {
        Ok(data) => Json(data).into_response(),
        Err(e) => {
            tracing::error!("{} returned unreadable JSON: {}", upstream, e);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, failure)
        }
    }
}

pub(crate) async fn index(user: Option<AuthUser>) -> String {
    match user {
        Some(u) => format!("Signed in as Steam user {}", u.steam_id),
        None => format!(
            "Not signed in. GET {}/auth/steam-login to start.",
            STEAM_ROUTE_PREFIX.as_str()
        ),
    }
}

/// Games owned by the signed-in user
pub(crate) async fn owned_games(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Response {
    let Some(api_key) = STEAM_API_KEY.as_deref() else {
        tracing::error!("STEAM_API_KEY not configured");
        return json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server configuration error",
        );
    };

    let request = state.client.get(OWNED_GAMES_URL).query(&[
        ("key", api_key),
        ("steamid", user.steam_id.as_str()),
        ("include_appinfo", "1"),
        ("include_played_free_games", "1"),
        ("format", "json"),
    ]);
    proxy_json(request, "Steam API", "Failed to fetch owned games").await
}

pub(crate) async fn game_details(
    State(state): State<AppState>,
    Query(query): Query<AppIdQuery>,
) -> Response {
    let app_id = match require_app_id(&query) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let request = state
        .client
        .get(APP_DETAILS_URL)
        .query(&[("appids", app_id)]);
    proxy_json(request, "Steam Store API", "Failed to fetch game details").await
}

pub(crate) async fn game_reviews(
    State(state): State<AppState>,
    Query(query): Query<AppIdQuery>,
) -> Response {
    let app_id = match require_app_id(&query) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let request = state
        .client
        .get(format!("{APP_REVIEWS_URL}/{app_id}"))
        .query(&[("json", "1"), ("language", "all"), ("purchase_type", "all")]);
    proxy_json(request, "Steam reviews API", "Failed to fetch game reviews").await
}
