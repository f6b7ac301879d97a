use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use axum_extra::extract::cookie::CookieJar;
use std::convert::Infallible;
use tracing::{debug, warn};

use crate::auth::Session;
use crate::router::AppState;

/// Pull the caller's access token from the request.
/// Accepts either:
/// - Header: `Authorization: Bearer <token>`
/// - Cookie: the configured session cookie holding the raw token
pub fn access_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        let auth = auth.trim();
        if let Some(token) = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            && !token.trim().is_empty()
        {
            return Some(token.trim().to_string());
        }
    }

    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|c| c.value().trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Session of the current request. Never rejects: a missing, unknown or
/// unverifiable token yields an anonymous session.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = access_token(&parts.headers, &state.session_cookie) else {
            return Ok(Self(Session::anonymous()));
        };

        match state.auth.resolve(&token).await {
            Ok(Some(user_id)) => Ok(Self(Session::new(Some(token), Some(user_id)))),
            // A rejected token must not reach the data API; fall back to the anon key.
            Ok(None) => {
                debug!("access token not recognised; continuing anonymously");
                Ok(Self(Session::anonymous()))
            }
            Err(e) => {
                warn!(error = %e, "identity lookup failed; continuing anonymously");
                Ok(Self(Session::anonymous()))
            }
        }
    }
}
