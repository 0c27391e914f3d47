use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::{error::ApiError, spotify::SpotifyClient};

/// Refresh this many seconds before the access token actually expires.
const REFRESH_LEEWAY_SECS: i64 = 60;

/// Server-side record of a completed login.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Wall-clock unix time beyond which the access token is stale.
    pub expires_at: i64,
}

impl Session {
    /// True once the token is within the refresh leeway of its expiry.
    pub fn needs_refresh(&self, now: i64) -> bool {
        now > self.expires_at - REFRESH_LEEWAY_SECS
    }
}

/// Registry of authenticated sessions, keyed by an opaque identifier that
/// the client carries in a cookie or the `X-Session-ID` header.
///
/// Sessions are created on a successful token exchange, mutated in place by
/// the refresh path, and evicted only when a refresh fails during a status
/// check. Logout clears the client's cookie but leaves the entry in place.
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: HashMap<String, Session>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new session and returns its freshly allocated identifier.
    pub fn create(
        &mut self,
        access_token: String,
        refresh_token: Option<String>,
        expires_at: i64,
    ) -> String {
        let session_id = Uuid::new_v4().to_string();
        self.sessions.insert(
            session_id.clone(),
            Session {
                access_token,
                refresh_token,
                expires_at,
            },
        );
        session_id
    }

    pub fn get(&self, session_id: &str) -> Option<Session> {
        self.sessions.get(session_id).cloned()
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Removes a session. Used when a refresh fails during a status check.
    pub fn evict(&mut self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    /// Refreshes the session's access token when it is about to expire.
    ///
    /// On success the access token and expiry are mutated in place. On any
    /// failure the session is left untouched and the error is returned; the
    /// caller decides whether that is fatal. The status endpoint evicts the
    /// session, while the data endpoints proceed with the stale token and
    /// let the subsequent upstream call fail with an auth error.
    pub async fn refresh_if_needed(
        &mut self,
        session_id: &str,
        spotify: &SpotifyClient,
    ) -> Result<(), ApiError> {
        let now = Utc::now().timestamp();

        let Some(session) = self.sessions.get(session_id) else {
            return Err(ApiError::NotLoggedIn);
        };
        if !session.needs_refresh(now) {
            return Ok(());
        }

        let refresh_token = session
            .refresh_token
            .clone()
            .ok_or(ApiError::RefreshFailed)?;

        let token = spotify.refresh(&refresh_token).await?;

        // Re-borrow after the await; the entry can only have been evicted
        // by a concurrent status check, in which case the refresh is moot.
        if let Some(session) = self.sessions.get_mut(session_id) {
            session.access_token = token.access_token;
            session.expires_at = now + token.expires_in.unwrap_or(3600);
            tracing::debug!(session_id, "access token refreshed");
        }

        Ok(())
    }
}
