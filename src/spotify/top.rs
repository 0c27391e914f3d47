use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::{
    error::ApiError,
    types::{TopArtistItem, TopArtistsPage, TopTrackItem, TopTracksPage, UserProfile},
};

use super::{SpotifyClient, TOKEN_TIMEOUT};

/// Number of top items requested per call.
const TOP_LIMIT: usize = 20;

impl SpotifyClient {
    /// Fetches the user's top tracks for the given time range
    /// (`short_term`, `medium_term` or `long_term`).
    pub async fn fetch_top_tracks(
        &self,
        token: &str,
        time_range: &str,
    ) -> Result<Vec<TopTrackItem>, ApiError> {
        let page: TopTracksPage = self
            .fetch_top("tracks", token, time_range, "failed to fetch top tracks")
            .await?;
        Ok(page.items)
    }

    /// Fetches the user's top artists for the given time range.
    pub async fn fetch_top_artists(
        &self,
        token: &str,
        time_range: &str,
    ) -> Result<Vec<TopArtistItem>, ApiError> {
        let page: TopArtistsPage = self
            .fetch_top("artists", token, time_range, "failed to fetch top artists")
            .await?;
        Ok(page.items)
    }

    /// Fetches the authenticated user's profile.
    pub async fn fetch_profile(&self, token: &str) -> Result<UserProfile, ApiError> {
        let res = self
            .http
            .get(format!("{}/me", self.api_url))
            .bearer_auth(token)
            .timeout(TOKEN_TIMEOUT)
            .send()
            .await?;

        let res = Self::check_status(res, "failed to fetch user profile")?;
        Ok(res.json().await?)
    }

    /// Shared top-items call: one request, no pagination, upstream status
    /// passed through on failure.
    async fn fetch_top<T: DeserializeOwned>(
        &self,
        kind: &str,
        token: &str,
        time_range: &str,
        context: &str,
    ) -> Result<T, ApiError> {
        let res = self
            .http
            .get(format!("{}/me/top/{}", self.api_url, kind))
            .bearer_auth(token)
            .query(&[("time_range", time_range)])
            .query(&[("limit", TOP_LIMIT)])
            .timeout(TOKEN_TIMEOUT)
            .send()
            .await?;

        let res = Self::check_status(res, context)?;
        Ok(res.json().await?)
    }

    fn check_status(res: Response, context: &str) -> Result<Response, ApiError> {
        let status = res.status();
        if !status.is_success() {
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                context: context.to_string(),
            });
        }
        Ok(res)
    }
}
