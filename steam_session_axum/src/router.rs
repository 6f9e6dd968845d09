//! Router for the Steam sign-in endpoints

use axum::Router;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Create the router for the Steam sign-in endpoints
///
/// Mount it at [`STEAM_ROUTE_PREFIX`](crate::STEAM_ROUTE_PREFIX). The endpoints
/// will be available at:
/// - {STEAM_ROUTE_PREFIX}/auth/steam-login
/// - {STEAM_ROUTE_PREFIX}/auth/steam-callback
///
/// Request headers are not recorded in the trace span because protected routes
/// carry bearer tokens.
pub fn steam_session_router() -> Router {
    steam_session_router_no_trace().layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`steam_session_router`] but without the HTTP tracing middleware
pub fn steam_session_router_no_trace() -> Router {
    Router::new().nest("/auth", super::steam::router())
}
