use axum::{
    Json,
    extract::{FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use http::{HeaderMap, StatusCode, request::Parts};
use serde_json::json;

use steam_session::{
    CoordinationError, SessionPayload, authenticate_token_core, bearer_token_from_headers,
};

/// Why a request could not be tied to a signed-in Steam user
///
/// Bad signatures, foreign tokens and expired tokens all produce the same
/// response so the client cannot tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    Internal,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => {
                (StatusCode::UNAUTHORIZED, "No authorization token provided")
            }
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
            AuthError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Server configuration error"),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Signed-in Steam user, available as an Axum extractor
///
/// Reads `Authorization: Bearer <token>` and validates the session token.
///
/// # Example
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use steam_session_axum::AuthUser;
///
/// async fn protected_handler(user: AuthUser) -> String {
///     format!("Hello, {}!", user.steam_id)
/// }
///
/// let app: Router = Router::new()
///     .route("/protected", get(protected_handler));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    /// 64-bit Steam ID the token was issued for
    pub steam_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<SessionPayload> for AuthUser {
    fn from(payload: SessionPayload) -> Self {
        AuthUser {
            steam_id: payload.subject,
            issued_at: payload.issued_at,
            expires_at: payload.expires_at,
        }
    }
}

impl AuthUser {
    pub(super) fn from_headers(headers: &HeaderMap) -> Result<Self, AuthError> {
        let Some(token) = bearer_token_from_headers(headers) else {
            tracing::debug!("No bearer token in request");
            return Err(AuthError::MissingToken);
        };

        match authenticate_token_core(token) {
            Ok(payload) => Ok(AuthUser::from(payload)),
            Err(CoordinationError::Unauthorized) => Err(AuthError::InvalidToken),
            Err(e) => {
                tracing::error!("Cannot validate session tokens: {}", e);
                Err(AuthError::Internal)
            }
        }
    }
}

impl<B> FromRequestParts<B> for AuthUser
where
    B: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _: &B) -> Result<Self, Self::Rejection> {
        AuthUser::from_headers(&parts.headers)
    }
}

impl<B> OptionalFromRequestParts<B> for AuthUser
where
    B: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &B,
    ) -> Result<Option<Self>, Self::Rejection> {
        match AuthUser::from_headers(&parts.headers) {
            Ok(user) => Ok(Some(user)),
            Err(AuthError::Internal) => Err(AuthError::Internal),
            Err(_) => Ok(None),
        }
    }
}
