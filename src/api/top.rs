use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
};
use serde::Deserialize;

use crate::{
    error::ApiError,
    server::AppState,
    types::{TopArtistsResponse, TopTracksResponse},
};

use super::authorized_token;

/// Accepted values for the `time_range` query parameter.
const TIME_RANGES: &[&str] = &["short_term", "medium_term", "long_term"];

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    #[serde(default = "default_time_range")]
    pub time_range: String,
}

fn default_time_range() -> String {
    "medium_term".to_string()
}

/// `GET /api/top-tracks?time_range=..` - the user's most-played tracks.
pub async fn top_tracks(
    State(app): State<AppState>,
    Query(query): Query<TopQuery>,
    headers: HeaderMap,
) -> Result<Json<TopTracksResponse>, ApiError> {
    validate_time_range(&query.time_range)?;
    let access_token = authorized_token(&app, &headers).await?;

    let top_tracks = app
        .spotify
        .fetch_top_tracks(&access_token, &query.time_range)
        .await?;

    Ok(Json(TopTracksResponse {
        time_range: query.time_range,
        top_tracks,
    }))
}

/// `GET /api/top-artists?time_range=..` - the user's most-played artists.
pub async fn top_artists(
    State(app): State<AppState>,
    Query(query): Query<TopQuery>,
    headers: HeaderMap,
) -> Result<Json<TopArtistsResponse>, ApiError> {
    validate_time_range(&query.time_range)?;
    let access_token = authorized_token(&app, &headers).await?;

    let top_artists = app
        .spotify
        .fetch_top_artists(&access_token, &query.time_range)
        .await?;

    Ok(Json(TopArtistsResponse {
        time_range: query.time_range,
        top_artists,
    }))
}

fn validate_time_range(value: &str) -> Result<(), ApiError> {
    if TIME_RANGES.contains(&value) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "invalid time_range '{value}': expected short_term, medium_term or long_term"
        )))
    }
}
