//! HTTP API endpoints.
//!
//! This module holds the handlers behind the JSON API consumed by the
//! single-page front end:
//!
//! - [`login`], [`callback`], [`logout`] - the OAuth authorization-code
//!   flow against Spotify's accounts service
//! - [`status`] - lightweight logged-in probe with an optional profile
//! - [`analysis`] - the saved-library genre-distribution aggregation
//! - [`top_tracks`], [`top_artists`] - top-item passthrough endpoints
//! - [`health`] - health check for monitoring
//!
//! Session identity is carried by either a `session_id` cookie or an
//! `X-Session-ID` header, checked cookie-first on every authenticated
//! endpoint. The cookie is a best-effort channel: when the front end runs
//! on a different origin the browser may refuse it, which is why the
//! callback also hands the session id over as a URL parameter.

mod analysis;
mod health;
mod login;
mod status;
mod top;

pub use analysis::analysis;
pub use analysis::{cap_and_merge, collect_artist_ids, tally_artist_buckets, tally_genres, top_genres};
pub use health::health;
pub use login::callback;
pub use login::login;
pub use login::logout;
pub use status::status;
pub use top::top_artists;
pub use top::top_tracks;

use axum::http::{HeaderMap, header};
use axum::response::Html;
use cookie::Cookie;

use crate::{error::ApiError, server::AppState};

/// Name of the session cookie set on a successful callback.
pub(crate) const SESSION_COOKIE: &str = "session_id";

/// Minimal landing page; the real front end is a separate SPA.
pub async fn index() -> Html<&'static str> {
    Html("<h1>tunescope</h1><p>Backend running. Start at <a href=\"/login\">/login</a>.</p>")
}

/// Extracts the session id from the request, cookie first, then the
/// `X-Session-ID` header.
pub(crate) fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(raw) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) {
        for cookie in Cookie::split_parse(raw).flatten() {
            if cookie.name() == SESSION_COOKIE {
                return Some(cookie.value().to_string());
            }
        }
    }

    headers
        .get("x-session-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Resolves the session for a data endpoint and returns an access token.
///
/// Performs a best-effort refresh first: a failed refresh is logged and
/// ignored so the stale token flows through to the upstream call, which
/// then fails with the real auth error. Only a missing or unknown session
/// id yields [`ApiError::NotLoggedIn`] here.
pub(crate) async fn authorized_token(
    app: &AppState,
    headers: &HeaderMap,
) -> Result<String, ApiError> {
    let session_id = session_id_from_headers(headers).ok_or(ApiError::NotLoggedIn)?;

    let mut sessions = app.sessions.lock().await;
    if !sessions.contains(&session_id) {
        return Err(ApiError::NotLoggedIn);
    }

    if let Err(e) = sessions.refresh_if_needed(&session_id, &app.spotify).await {
        tracing::debug!(error = %e, "token refresh failed; proceeding with stale token");
    }

    sessions
        .get(&session_id)
        .map(|s| s.access_token)
        .ok_or(ApiError::NotLoggedIn)
}
