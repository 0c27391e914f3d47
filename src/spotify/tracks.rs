use reqwest::StatusCode;

use crate::{
    error::ApiError,
    types::{SavedTrackItem, SavedTracksPage},
};

use super::{FETCH_TIMEOUT, SpotifyClient};

/// Page size for the saved-tracks library endpoint (upstream maximum).
const PAGE_SIZE: usize = 50;

impl SpotifyClient {
    /// Fetches the user's entire saved-tracks library.
    ///
    /// Pages through `/me/tracks` at a fixed page size, following the
    /// upstream `next` indicator until it is absent or a page comes back
    /// empty, and accumulates all items in memory before returning.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] on a 401 (stale or revoked token)
    /// - [`ApiError::Forbidden`] on a 403 (missing `user-library-read`)
    /// - [`ApiError::Upstream`] on any other non-2xx response
    /// - [`ApiError::Http`] on transport failures or a non-JSON body
    pub async fn fetch_saved_tracks(&self, token: &str) -> Result<Vec<SavedTrackItem>, ApiError> {
        let mut tracks = Vec::new();
        let mut offset = 0usize;

        loop {
            let res = self
                .http
                .get(format!("{}/me/tracks", self.api_url))
                .bearer_auth(token)
                .query(&[("limit", PAGE_SIZE), ("offset", offset)])
                .timeout(FETCH_TIMEOUT)
                .send()
                .await?;

            match res.status() {
                StatusCode::UNAUTHORIZED => return Err(ApiError::Unauthorized),
                StatusCode::FORBIDDEN => return Err(ApiError::Forbidden),
                status if !status.is_success() => {
                    return Err(ApiError::Upstream {
                        status: status.as_u16(),
                        context: "failed to fetch saved tracks".to_string(),
                    });
                }
                _ => {}
            }

            let page: SavedTracksPage = res.json().await?;

            if page.items.is_empty() {
                break;
            }
            tracks.extend(page.items);

            if page.next.is_none() {
                break;
            }
            offset += PAGE_SIZE;
        }

        tracing::debug!(total = tracks.len(), "fetched saved tracks");
        Ok(tracks)
    }
}
