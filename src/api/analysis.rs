//! The genre-aggregation pipeline.
//!
//! One `/api/analysis` request runs the full pass: fetch every saved
//! track, collect the distinct artists behind them, batch-fetch their
//! genre lists, then tally on two deliberately different granularities.
//! Genre counts are per-tag (an artist with three genres contributes to
//! three counts) while bucket counts are one-bucket-per-artist, classified
//! from the artist's first-listed genre only. Small buckets fold into
//! "Other" so the chart stays readable.
//!
//! The tallying and merging steps are pure functions over already-fetched
//! data; all I/O happens up front in the handler.

use std::collections::{HashMap, HashSet};

use axum::{Json, extract::State, http::HeaderMap};

use crate::{
    error::ApiError,
    genres,
    server::AppState,
    types::{AnalysisReport, ArtistObject, SavedTrackItem},
};

use super::authorized_token;

/// Upper bound on buckets in the final distribution (9 largest + "Other").
const MAX_BUCKETS: usize = 10;

/// Number of raw genre tags reported back.
const TOP_GENRES_LIMIT: usize = 20;

/// Share of distinct artists a bucket needs to stand on its own.
const MIN_BUCKET_SHARE: f64 = 0.02;

/// `GET /api/analysis` - aggregates the saved-track library into a genre
/// distribution.
pub async fn analysis(
    State(app): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AnalysisReport>, ApiError> {
    let access_token = authorized_token(&app, &headers).await?;

    let tracks = app.spotify.fetch_saved_tracks(&access_token).await?;
    if tracks.is_empty() {
        // Nothing saved: report the empty shape without any artist calls.
        return Ok(Json(AnalysisReport {
            total_tracks: 0,
            buckets: HashMap::new(),
            top_genres: Vec::new(),
        }));
    }

    let artist_ids = collect_artist_ids(&tracks);
    let artists = app
        .spotify
        .fetch_artist_genres(&access_token, &artist_ids)
        .await?;

    let genre_counts = tally_genres(&artists);
    let (bucket_counts, distinct_artists) = tally_artist_buckets(&artists);

    Ok(Json(AnalysisReport {
        total_tracks: tracks.len(),
        buckets: cap_and_merge(bucket_counts, distinct_artists),
        top_genres: top_genres(genre_counts),
    }))
}

/// Extracts every artist id referenced by any saved track, deduplicated
/// preserving first-seen order.
pub fn collect_artist_ids(tracks: &[SavedTrackItem]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for item in tracks {
        let Some(track) = &item.track else { continue };
        for artist in &track.artists {
            if seen.insert(artist.id.clone()) {
                ids.push(artist.id.clone());
            }
        }
    }

    ids
}

/// Per-tag genre counts in first-seen order. An artist with an empty
/// genre list counts once under `"unknown"`; otherwise every tag in its
/// list is counted.
pub fn tally_genres(artists: &[ArtistObject]) -> Vec<(String, u64)> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    let bump = |counts: &mut HashMap<String, u64>, order: &mut Vec<String>, key: &str| {
        let entry = counts.entry(key.to_string()).or_insert_with(|| {
            order.push(key.to_string());
            0
        });
        *entry += 1;
    };

    for artist in artists {
        if artist.genres.is_empty() {
            bump(&mut counts, &mut order, "unknown");
        }
        for genre in &artist.genres {
            bump(&mut counts, &mut order, genre);
        }
    }

    order
        .into_iter()
        .map(|key| {
            let count = counts[&key];
            (key, count)
        })
        .collect()
}

/// One bucket per distinct artist, classified from its first-listed genre
/// (artists without genres land in "Unknown"). Returns the counts in
/// first-seen bucket order plus the number of distinct artists tallied.
pub fn tally_artist_buckets(artists: &[ArtistObject]) -> (Vec<(String, u64)>, usize) {
    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    let mut processed = HashSet::new();

    for artist in artists {
        // Guard against duplicate ids in the upstream response.
        if !processed.insert(artist.id.clone()) {
            continue;
        }

        let bucket = match artist.genres.first() {
            Some(primary) => genres::classify(primary),
            None => "Unknown".to_string(),
        };

        let entry = counts.entry(bucket.clone()).or_insert_with(|| {
            order.push(bucket);
            0
        });
        *entry += 1;
    }

    let pairs = order
        .into_iter()
        .map(|key| {
            let count = counts[&key];
            (key, count)
        })
        .collect();

    (pairs, processed.len())
}

/// Folds insignificant buckets into "Other" and caps the result at
/// [`MAX_BUCKETS`] keys.
///
/// A bucket must cover at least 2% of the distinct artists (minimum one)
/// to stand on its own. If more than ten buckets survive, the nine
/// largest are kept (stable over first-seen order) and the rest are
/// summed into "Other".
pub fn cap_and_merge(pairs: Vec<(String, u64)>, distinct_artists: usize) -> HashMap<String, u64> {
    let threshold = (distinct_artists as f64 * MIN_BUCKET_SHARE).max(1.0);

    let mut kept: Vec<(String, u64)> = Vec::new();
    let mut folded: u64 = 0;
    for (bucket, count) in pairs {
        if count as f64 >= threshold {
            kept.push((bucket, count));
        } else {
            folded += count;
        }
    }
    if folded > 0 {
        add_to_other(&mut kept, folded);
    }

    if kept.len() > MAX_BUCKETS {
        kept.sort_by(|a, b| b.1.cmp(&a.1));
        let overflow: u64 = kept.split_off(MAX_BUCKETS - 1).into_iter().map(|(_, c)| c).sum();
        if overflow > 0 {
            add_to_other(&mut kept, overflow);
        }
    }

    kept.into_iter().collect()
}

/// Raw genre tags sorted by descending count, stable over first-seen
/// order, truncated to [`TOP_GENRES_LIMIT`]. Returned as ordered pairs
/// because the order is significant.
pub fn top_genres(mut counts: Vec<(String, u64)>) -> Vec<(String, u64)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(TOP_GENRES_LIMIT);
    counts
}

/// The classifier itself can produce an "Other" bucket, so folded counts
/// accumulate into an existing entry rather than shadowing it.
fn add_to_other(kept: &mut Vec<(String, u64)>, amount: u64) {
    match kept.iter_mut().find(|(bucket, _)| bucket == "Other") {
        Some((_, count)) => *count += amount,
        None => kept.push(("Other".to_string(), amount)),
    }
}
