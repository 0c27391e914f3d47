use tunescope::api::{cap_and_merge, collect_artist_ids, tally_artist_buckets, tally_genres, top_genres};
use tunescope::types::{ArtistObject, SavedTrack, SavedTrackItem, TrackArtistRef};

fn saved_track(artist_ids: &[&str]) -> SavedTrackItem {
    SavedTrackItem {
        track: Some(SavedTrack {
            artists: artist_ids
                .iter()
                .map(|id| TrackArtistRef {
                    id: id.to_string(),
                    name: format!("{id} name"),
                })
                .collect(),
        }),
    }
}

fn artist(id: &str, genres: &[&str]) -> ArtistObject {
    ArtistObject {
        id: id.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

#[test]
fn test_collect_artist_ids_dedupes_preserving_order() {
    let tracks = vec![
        saved_track(&["a", "b"]),
        saved_track(&["b", "c"]),
        saved_track(&["a"]),
    ];

    assert_eq!(collect_artist_ids(&tracks), vec!["a", "b", "c"]);
}

#[test]
fn test_collect_artist_ids_skips_null_tracks() {
    let tracks = vec![SavedTrackItem { track: None }, saved_track(&["a"])];
    assert_eq!(collect_artist_ids(&tracks), vec!["a"]);
}

#[test]
fn test_tally_genres_counts_every_tag() {
    let artists = vec![
        artist("a", &["indie rock", "dream pop"]),
        artist("b", &[]),
        artist("c", &["indie rock"]),
    ];

    // Per-tag counts: an artist with two genres contributes to two counts,
    // an artist without genres counts once under "unknown".
    assert_eq!(
        tally_genres(&artists),
        vec![
            ("indie rock".to_string(), 2),
            ("dream pop".to_string(), 1),
            ("unknown".to_string(), 1),
        ]
    );
}

#[test]
fn test_tally_artist_buckets_uses_primary_genre_only() {
    let artists = vec![
        artist("a", &["Indie Rock"]),
        artist("b", &[]),
        artist("c", &["Indie Rock"]),
        artist("d", &["Jazz"]),
    ];

    let (pairs, distinct) = tally_artist_buckets(&artists);
    assert_eq!(distinct, 4);
    assert_eq!(
        pairs,
        vec![
            ("Rock".to_string(), 2),
            ("Unknown".to_string(), 1),
            ("Jazz".to_string(), 1),
        ]
    );

    // With 4 distinct artists the threshold is max(1, 0.08) = 1, so no
    // bucket folds into "Other".
    let buckets = cap_and_merge(pairs, distinct);
    assert_eq!(buckets.len(), 3);
    assert_eq!(buckets["Rock"], 2);
    assert_eq!(buckets["Unknown"], 1);
    assert_eq!(buckets["Jazz"], 1);
    assert!(!buckets.contains_key("Other"));
}

#[test]
fn test_tally_artist_buckets_guards_against_duplicate_ids() {
    let artists = vec![artist("a", &["Jazz"]), artist("a", &["Jazz"])];

    let (pairs, distinct) = tally_artist_buckets(&artists);
    assert_eq!(distinct, 1);
    assert_eq!(pairs, vec![("Jazz".to_string(), 1)]);
}

#[test]
fn test_tally_artist_buckets_classifies_second_genre_never() {
    // Only the first-listed genre decides the bucket.
    let artists = vec![artist("a", &["accordion", "jazz"])];
    let (pairs, _) = tally_artist_buckets(&artists);
    assert_eq!(pairs, vec![("Accordion".to_string(), 1)]);
}

#[test]
fn test_cap_and_merge_folds_small_buckets_into_other() {
    // 100 distinct artists puts the threshold at 2.
    let pairs = vec![
        ("Rock".to_string(), 60),
        ("Pop".to_string(), 38),
        ("Jazz".to_string(), 1),
        ("Folk".to_string(), 1),
    ];

    let buckets = cap_and_merge(pairs, 100);
    assert_eq!(buckets.len(), 3);
    assert_eq!(buckets["Rock"], 60);
    assert_eq!(buckets["Pop"], 38);
    assert_eq!(buckets["Other"], 2);
}

#[test]
fn test_cap_and_merge_accumulates_into_existing_other() {
    // The classifier itself produces "Other" for long unmatched tags, so
    // the folded remainder joins it instead of shadowing it.
    let pairs = vec![
        ("Rock".to_string(), 50),
        ("Other".to_string(), 48),
        ("Jazz".to_string(), 1),
    ];

    let buckets = cap_and_merge(pairs, 100);
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets["Other"], 49);
}

#[test]
fn test_cap_and_merge_keeps_at_most_ten_buckets() {
    // 12 buckets, all above threshold. The nine largest survive and the
    // rest sum into "Other".
    let pairs: Vec<(String, u64)> = (1..=12)
        .map(|i| (format!("Bucket{i}"), i as u64 * 10))
        .collect();

    let buckets = cap_and_merge(pairs, 100);
    assert_eq!(buckets.len(), 10);
    // Bucket12 (120) down to Bucket4 (40) survive; 10 + 20 + 30 fold.
    assert_eq!(buckets["Bucket12"], 120);
    assert_eq!(buckets["Bucket4"], 40);
    assert!(!buckets.contains_key("Bucket3"));
    assert_eq!(buckets["Other"], 60);
}

#[test]
fn test_top_genres_sorted_descending_and_truncated() {
    let counts: Vec<(String, u64)> = (0..25).map(|i| (format!("g{i}"), i as u64)).collect();

    let top = top_genres(counts);
    assert_eq!(top.len(), 20);
    assert_eq!(top[0], ("g24".to_string(), 24));
    assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
}

#[test]
fn test_top_genres_ties_keep_first_seen_order() {
    let counts = vec![
        ("later".to_string(), 3),
        ("first".to_string(), 5),
        ("second".to_string(), 5),
    ];

    let top = top_genres(counts);
    assert_eq!(
        top,
        vec![
            ("first".to_string(), 5),
            ("second".to_string(), 5),
            ("later".to_string(), 3),
        ]
    );
}
