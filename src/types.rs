use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Token payload returned by the accounts service for both the
/// authorization-code and the refresh-token grant. The refresh grant omits
/// `refresh_token`, and `expires_in` is occasionally absent (treated as one
/// hour by the callers).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// One page of the saved-tracks library endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedTracksPage {
    #[serde(default)]
    pub items: Vec<SavedTrackItem>,
    #[serde(default)]
    pub next: Option<String>,
}

/// A library entry wrapping the actual track. `track` can be null for
/// removed or region-blocked content.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedTrackItem {
    #[serde(default)]
    pub track: Option<SavedTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedTrack {
    #[serde(default)]
    pub artists: Vec<TrackArtistRef>,
}

/// Artist reference embedded in a track object.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackArtistRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Envelope of the batched `/artists?ids=..` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistsEnvelope {
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistObject {
    pub id: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// One page of `/me/top/tracks`.
#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksPage {
    #[serde(default)]
    pub items: Vec<TopTrackItem>,
}

/// One page of `/me/top/artists`.
#[derive(Debug, Clone, Deserialize)]
pub struct TopArtistsPage {
    #[serde(default)]
    pub items: Vec<TopArtistItem>,
}

/// Field subset of a top track passed through to the front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTrackItem {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TopTrackArtist>,
    pub album: TopTrackAlbum,
    #[serde(default)]
    pub popularity: Option<i64>,
    #[serde(default)]
    pub duration_ms: Option<i64>,
    #[serde(default)]
    pub explicit: bool,
    pub id: String,
    #[serde(default)]
    pub external_urls: Map<String, Value>,
    #[serde(default)]
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTrackAlbum {
    pub name: String,
    #[serde(default)]
    pub images: Vec<Value>,
}

/// Field subset of a top artist passed through to the front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopArtistItem {
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub popularity: Option<i64>,
    pub id: String,
    #[serde(default)]
    pub external_urls: Map<String, Value>,
    #[serde(default)]
    pub images: Vec<Value>,
    #[serde(default)]
    pub followers: Map<String, Value>,
}

/// Profile subset used by the status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub followers: Map<String, Value>,
    #[serde(default)]
    pub images: Vec<Value>,
}

/// Result of one aggregation pass over the saved-track library.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub total_tracks: usize,
    pub buckets: HashMap<String, u64>,
    /// Ordered (genre, count) pairs, descending by count. A list rather
    /// than a map because the order is significant.
    pub top_genres: Vec<(String, u64)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopTracksResponse {
    pub time_range: String,
    pub top_tracks: Vec<TopTrackItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopArtistsResponse {
    pub time_range: String,
    pub top_artists: Vec<TopArtistItem>,
}
