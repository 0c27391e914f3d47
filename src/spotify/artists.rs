use crate::{
    error::ApiError,
    types::{ArtistObject, ArtistsEnvelope},
};

use super::{FETCH_TIMEOUT, SpotifyClient};

/// Maximum number of ids per batched `/artists` request (upstream limit).
const BATCH_SIZE: usize = 50;

impl SpotifyClient {
    /// Looks up genre lists for a set of artist ids.
    ///
    /// Partitions `artist_ids` into consecutive batches of at most
    /// [`BATCH_SIZE`] and issues one request per batch. The returned
    /// artists keep the upstream response order, so first-seen ordering of
    /// the input is preserved across batches.
    ///
    /// # Errors
    ///
    /// A single failing batch aborts the whole call with
    /// [`ApiError::ArtistFetchFailed`], discarding genres already collected
    /// from earlier batches. There is no partial recovery.
    pub async fn fetch_artist_genres(
        &self,
        token: &str,
        artist_ids: &[String],
    ) -> Result<Vec<ArtistObject>, ApiError> {
        let mut artists = Vec::with_capacity(artist_ids.len());

        for batch in artist_ids.chunks(BATCH_SIZE) {
            let res = self
                .http
                .get(format!("{}/artists", self.api_url))
                .bearer_auth(token)
                .query(&[("ids", batch.join(","))])
                .timeout(FETCH_TIMEOUT)
                .send()
                .await?;

            if !res.status().is_success() {
                tracing::warn!(status = %res.status(), "artist batch rejected");
                return Err(ApiError::ArtistFetchFailed);
            }

            let envelope: ArtistsEnvelope =
                res.json().await.map_err(|_| ApiError::ArtistFetchFailed)?;
            artists.extend(envelope.artists);
        }

        Ok(artists)
    }
}
