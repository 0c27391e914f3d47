use axum::{
    extract::{Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use cookie::{Cookie, SameSite};
use serde::Deserialize;

use crate::{config, error::ApiError, server::AppState};

use super::SESSION_COOKIE;

/// Fallback front-end origin for local development.
const LOCAL_FRONTEND_URL: &str = "http://localhost:5173";

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// `GET /login` - issues a state token and redirects the browser to the
/// Spotify authorization page.
pub async fn login(State(app): State<AppState>) -> Response {
    let state = app
        .oauth_states
        .lock()
        .await
        .issue(Utc::now().timestamp());

    let url = app.spotify.authorize_url(&state, config::spotify_scope());
    tracing::debug!(state, "issued login redirect");

    found(&url)
}

/// `GET /callback` - completes the login attempt.
///
/// Flow per attempt: validate the returned state (single-use, 400 on
/// invalid or expired), exchange the authorization code for tokens (400 on
/// failure), create a session, then redirect to the front end with the
/// session id both as a `?session=` URL parameter and a `session_id`
/// cookie. Any failure terminates the attempt; the user restarts at
/// `/login`. An `error` from upstream short-circuits to an HTML error page
/// without touching the state registry.
pub async fn callback(
    State(app): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Response, ApiError> {
    if let Some(error) = params.error {
        tracing::warn!(error, "authorization denied upstream");
        return Ok(Html(format!("<h3>Spotify login error: {error}</h3>")).into_response());
    }

    let state = params.state.ok_or(ApiError::InvalidState)?;
    app.oauth_states
        .lock()
        .await
        .consume(&state, Utc::now().timestamp())?;

    // No code past a valid state means the exchange cannot happen.
    let code = params.code.ok_or(ApiError::TokenExchangeFailed)?;
    let token = app.spotify.exchange_code(&code).await?;
    let expires_at = Utc::now().timestamp() + token.expires_in.unwrap_or(3600);

    let session_id = app
        .sessions
        .lock()
        .await
        .create(token.access_token, token.refresh_token, expires_at);

    let frontend = resolve_frontend_url(config::frontend_url(), app.spotify.redirect_uri());
    let target = format!("{frontend}?login=success&session={session_id}");

    // Cookie is the secondary channel; the URL parameter above is primary
    // since the front end may live on a different origin.
    let cookie = Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(false)
        .same_site(SameSite::Lax)
        .secure(frontend.contains("https"))
        .build();

    tracing::info!(frontend, "login completed");
    Ok(found_with_cookie(&target, &cookie.to_string()))
}

/// `GET /logout` - clears the session cookie and redirects home. The
/// session store entry itself is left in place.
pub async fn logout() -> Response {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();

    found_with_cookie("/", &cookie.to_string())
}

/// Picks the front-end URL a successful login redirects to.
///
/// An explicitly configured URL wins. Otherwise the target is inferred
/// from the callback's own redirect URI: known production hosts redirect
/// back to their own origin, anything else is treated as local
/// development.
pub fn resolve_frontend_url(configured: Option<String>, redirect_uri: &str) -> String {
    if let Some(url) = configured {
        return url;
    }

    if redirect_uri.contains("railway.app") || redirect_uri.contains("herokuapp.com") {
        redirect_uri.replace("/callback", "")
    } else {
        LOCAL_FRONTEND_URL.to_string()
    }
}

fn found(location: &str) -> Response {
    let mut response = StatusCode::FOUND.into_response();
    if let Ok(value) = HeaderValue::from_str(location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}

fn found_with_cookie(location: &str, cookie: &str) -> Response {
    let mut response = found(location);
    if let Ok(value) = HeaderValue::from_str(cookie) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}
