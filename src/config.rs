//! Configuration management for the genre aggregator.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and a `.env` file in the working directory. It
//! centralizes the Spotify API credentials, the OAuth redirect target, and
//! the server bind address.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. Application defaults (where applicable)

use std::env;

/// Loads environment variables from a `.env` file in the working directory.
///
/// A missing file is not an error; deployments commonly provide all values
/// through real environment variables.
pub fn load_env() {
    let _ = dotenv::dotenv();
}

/// Returns the address and port the HTTP server binds to.
///
/// Reads `SERVER_ADDRESS`, defaulting to `127.0.0.1:8000`.
///
/// # Example
///
/// ```
/// let addr = server_addr(); // e.g., "127.0.0.1:8000"
/// ```
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8000".to_string())
}

/// Returns the Spotify API client ID.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_CLIENT_ID").expect("SPOTIFY_CLIENT_ID must be set")
}

/// Returns the Spotify API client secret.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_SECRET` environment variable is not set.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> String {
    env::var("SPOTIFY_CLIENT_SECRET").expect("SPOTIFY_CLIENT_SECRET must be set")
}

/// Returns the OAuth redirect URI registered with the Spotify application.
///
/// Reads `REDIRECT_URI`, defaulting to `http://localhost:8000/callback`.
pub fn redirect_uri() -> String {
    env::var("REDIRECT_URI").unwrap_or_else(|_| "http://localhost:8000/callback".to_string())
}

/// Returns the explicitly configured front-end URL, if any.
///
/// When set, successful logins redirect here; otherwise the target is
/// inferred from the redirect URI (see `api::login`).
pub fn frontend_url() -> Option<String> {
    env::var("FRONTEND_URL").ok().filter(|v| !v.is_empty())
}

/// Returns the production origin added to the CORS allow-list, if any.
pub fn production_url() -> Option<String> {
    env::var("PRODUCTION_URL").ok().filter(|v| !v.is_empty())
}

/// OAuth scopes requested during login. `user-library-read` covers the
/// saved-tracks endpoint, `user-top-read` the top-tracks/artists endpoints.
pub fn spotify_scope() -> &'static str {
    "user-library-read user-top-read"
}
