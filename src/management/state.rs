use std::collections::HashMap;

use uuid::Uuid;

use crate::error::ApiError;

/// How long an issued state token stays valid, in seconds.
pub const STATE_TTL_SECS: i64 = 600;

/// Registry of in-flight authorization attempts.
///
/// Each `/login` request issues an opaque state token that the matching
/// `/callback` must present. A token is single-use by construction: consume
/// removes it whatever the outcome, and a sweep on every issue drops
/// attempts that were never completed.
///
/// All operations take `now` (unix seconds) explicitly so expiry behavior
/// is deterministic under test.
#[derive(Debug, Default)]
pub struct OauthStateManager {
    states: HashMap<String, i64>,
}

impl OauthStateManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh state token, recording its issue time, and sweeps
    /// every entry older than [`STATE_TTL_SECS`].
    pub fn issue(&mut self, now: i64) -> String {
        let state = Uuid::new_v4().to_string();
        self.states.insert(state.clone(), now);

        self.states.retain(|_, issued_at| now - *issued_at <= STATE_TTL_SECS);

        state
    }

    /// Validates and consumes a state token.
    ///
    /// Fails with [`ApiError::InvalidState`] when the token is unknown
    /// (never issued, already consumed, or swept) and with
    /// [`ApiError::ExpiredState`] when it is present but older than the
    /// TTL. The entry is removed in every case where it was found.
    pub fn consume(&mut self, state: &str, now: i64) -> Result<(), ApiError> {
        let issued_at = self.states.remove(state).ok_or(ApiError::InvalidState)?;

        if now - issued_at > STATE_TTL_SECS {
            return Err(ApiError::ExpiredState);
        }

        Ok(())
    }

    /// Number of live entries, used by tests to observe the sweep.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
