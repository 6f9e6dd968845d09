//! HTML pages shown in the sign-in browser once the callback is handled

use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use http::StatusCode;

use super::config::STEAM_APP_REDIRECT_URL;

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta http-equiv="refresh" content="{{ delay_secs }};url={{ redirect_url }}">
<title>{{ title }}</title>
<style>
body { font-family: Arial, sans-serif; padding: 20px; max-width: 600px; margin: 0 auto; text-align: center; }
</style>
</head>
<body>
<h1>{{ title }}</h1>
<p>{{ message }}</p>
<p><a href="{{ redirect_url }}">Return to the app</a></p>
</body>
</html>
"#
)]
struct ResultPageTemplate<'a> {
    title: &'a str,
    message: &'a str,
    redirect_url: &'a str,
    delay_secs: u32,
}

/// Outcome of a sign-in attempt as the client app sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum SignInOutcome {
    Success { token: String, steam_id: String },
    VerificationFailed,
    ServerError,
}

impl SignInOutcome {
    fn status(&self) -> StatusCode {
        match self {
            Self::Success { .. } => StatusCode::OK,
            Self::VerificationFailed => StatusCode::UNAUTHORIZED,
            Self::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub(super) fn redirect_url(&self) -> String {
        let base = STEAM_APP_REDIRECT_URL.as_str();
        match self {
            Self::Success { token, steam_id } => format!(
                "{base}/success?token={}&steamId={}",
                urlencoding::encode(token),
                urlencoding::encode(steam_id)
            ),
            Self::VerificationFailed => format!("{base}/error?message=verification_failed"),
            Self::ServerError => format!("{base}/error?message=server_error"),
        }
    }

    fn render(&self) -> askama::Result<String> {
        let redirect_url = self.redirect_url();
        let (title, message, delay_secs) = match self {
            Self::Success { .. } => ("Authentication Successful", "Redirecting to the app...", 0),
            Self::VerificationFailed => (
                "Authentication Failed",
                "Could not verify your Steam identity. Please try again.",
                2,
            ),
            Self::ServerError => (
                "Error",
                "An error occurred during authentication. Please try again.",
                2,
            ),
        };

        ResultPageTemplate {
            title,
            message,
            redirect_url: &redirect_url,
            delay_secs,
        }
        .render()
    }
}

impl IntoResponse for SignInOutcome {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(html) => (self.status(), Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render sign-in result page: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
