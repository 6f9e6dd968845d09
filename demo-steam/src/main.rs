use axum::{Router, middleware::from_fn, routing::get};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use steam_session_axum::{STEAM_ROUTE_PREFIX, is_authenticated_401, steam_session_router};

mod handlers;
mod server;

use crate::{
    handlers::{AppState, game_details, game_reviews, index, owned_games},
    server::{Ports, spawn_http_server, spawn_https_server},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install default CryptoProvider for rustls to prevent:
    // "no process-level CryptoProvider available -- call CryptoProvider::install_default() before this point"
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| "Failed to install default CryptoProvider")?;

    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=debug,steam_session=debug,steam_session_axum=debug,tower_http=info",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Fails here when JWT_SECRET is missing
    steam_session_axum::init().await?;

    let state = AppState {
        client: reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?,
    };

    let games = Router::new()
        .route(
            "/owned",
            get(owned_games).route_layer(from_fn(is_authenticated_401)),
        )
        .route("/details", get(game_details))
        .route("/reviews", get(game_reviews))
        .with_state(state);

    let app = Router::new()
        .route("/", get(index))
        .nest("/api/games", games)
        .nest(STEAM_ROUTE_PREFIX.as_str(), steam_session_router());

    let ports = Ports::from_env();

    let http_server = spawn_http_server(ports.http, app.clone());
    match spawn_https_server(ports.https, app).await {
        Some(https_server) => {
            tokio::try_join!(http_server, https_server)?;
        }
        None => {
            http_server.await?;
        }
    }
    Ok(())
}
