use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::session::AuthUser;

/// Authentication checker with 401 response
///
/// On success the [`AuthUser`] is stored in the request extensions for the
/// handlers behind this layer.
pub async fn is_authenticated_401(mut req: Request, next: Next) -> Response {
    match AuthUser::from_headers(req.headers()) {
        Ok(user) => {
            tracing::debug!("Authenticated Steam user {}", user.steam_id);
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}
