//! Error taxonomy for the HTTP surface and the Spotify client.
//!
//! Every fallible operation in the crate funnels into [`ApiError`], which
//! carries enough information to render the HTTP response the front end
//! expects: a `{"detail": ...}` body for most failures and the bare
//! `{"error": "not_logged_in"}` shape the SPA checks for on 401.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Callback carried a state token that was never issued, already
    /// consumed, or swept by the expiry pass.
    #[error("invalid or expired state")]
    InvalidState,

    /// State token existed but outlived its time-to-live window.
    #[error("state expired")]
    ExpiredState,

    /// Authorization-code exchange with the accounts service failed.
    #[error("token exchange failed")]
    TokenExchangeFailed,

    /// Refresh-token grant was rejected upstream.
    #[error("token refresh failed")]
    RefreshFailed,

    /// Request carried no session id, or the id is unknown to the registry.
    #[error("not_logged_in")]
    NotLoggedIn,

    /// Upstream rejected the access token mid-pipeline (401).
    #[error("access token invalid/expired")]
    Unauthorized,

    /// Upstream refused the call for missing scopes (403).
    #[error("insufficient scope: re-authorize to grant user-library-read and user-top-read")]
    Forbidden,

    /// One batch of the artist lookup failed; the whole call is aborted.
    #[error("artist fetch failed")]
    ArtistFetchFailed,

    /// Any other non-2xx upstream response, carrying its status code.
    #[error("{context}")]
    Upstream { status: u16, context: String },

    /// Malformed client input (e.g. an unknown `time_range` value).
    #[error("{0}")]
    BadRequest(String),

    /// Transport-level failure talking to Spotify. Surfaces as a 500, the
    /// last-resort safety net for the multi-stage fetch pipeline.
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// HTTP status this error renders as.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidState
            | ApiError::ExpiredState
            | ApiError::TokenExchangeFailed
            | ApiError::RefreshFailed
            | ApiError::ArtistFetchFailed
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotLoggedIn | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
            }
            ApiError::Http(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            // The SPA distinguishes "no session" by this exact shape.
            ApiError::NotLoggedIn => json!({ "error": "not_logged_in" }),
            other => json!({ "detail": other.to_string() }),
        };

        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request failed");
        } else {
            tracing::debug!(%status, error = %self, "request rejected");
        }

        (status, Json(body)).into_response()
    }
}
