//! Spotify Web API client.
//!
//! Thin request/response wrapper around the handful of upstream endpoints
//! the aggregator needs: token exchange and refresh against the accounts
//! service, the paginated saved-tracks library, batched artist lookups, the
//! top-tracks/artists endpoints, and the user profile.
//!
//! The calling contract matters more than the plumbing: the library is
//! paged at a fixed size of 50 until the upstream stops handing out a next
//! page, artist lookups go out in consecutive batches of at most 50 ids,
//! and every call carries its own fixed timeout. There is no retry logic;
//! failures surface immediately to the caller.

mod artists;
mod auth;
mod top;
mod tracks;

use std::{fmt, time::Duration};

use reqwest::Client;

use crate::config;

/// Spotify accounts authorization endpoint.
const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";

/// Spotify accounts token endpoint.
const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Spotify Web API base URL.
const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Timeout for token exchange/refresh and top-item calls.
pub(crate) const TOKEN_TIMEOUT: Duration = Duration::from_secs(15);

/// Timeout for the (potentially large) library and artist fetches.
pub(crate) const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Client for the Spotify Web API and accounts service.
///
/// Base URLs are injectable so tests can point the client at a local mock
/// server; production code uses [`SpotifyClient::from_config`].
#[derive(Clone)]
pub struct SpotifyClient {
    pub(crate) http: Client,
    pub(crate) auth_url: String,
    pub(crate) token_url: String,
    pub(crate) api_url: String,
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
    pub(crate) redirect_uri: String,
}

impl fmt::Debug for SpotifyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyClient")
            .field("api_url", &self.api_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

impl SpotifyClient {
    /// Creates a client with explicit credentials and base URLs.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        auth_url: impl Into<String>,
        token_url: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            auth_url: auth_url.into(),
            token_url: token_url.into(),
            api_url: api_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Creates the production client from the environment configuration.
    ///
    /// # Panics
    ///
    /// Panics if `SPOTIFY_CLIENT_ID` or `SPOTIFY_CLIENT_SECRET` is unset
    /// (checked at startup, see `main`).
    pub fn from_config() -> Self {
        Self::new(
            config::spotify_client_id(),
            config::spotify_client_secret(),
            config::redirect_uri(),
            SPOTIFY_AUTH_URL,
            SPOTIFY_TOKEN_URL,
            SPOTIFY_API_URL,
        )
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }
}
