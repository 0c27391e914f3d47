//! Genre bucket classification.
//!
//! Spotify reports free-text genre tags per artist ("australian garage punk",
//! "k-pop boy group", ...). For a readable distribution chart those tags are
//! collapsed into a small fixed vocabulary of display buckets. The mapping
//! tables here are a versioned behavioral contract: changing an entry or the
//! order of the substring rules changes the produced distributions.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Exact-match table from a lower-cased genre tag to its major bucket.
///
/// Consulted before any substring matching, so entries here win over the
/// generic rules in [`PRIORITY_RULES`] (e.g. "indie folk" maps to "Folk"
/// even though the tag contains "indie").
const GENRE_BUCKET_MAP: &[(&str, &str)] = &[
    // Pop
    ("pop", "Pop"),
    ("k-pop", "Pop"),
    ("j-pop", "Pop"),
    ("synthpop", "Pop"),
    ("indie pop", "Pop"),
    ("dance pop", "Pop"),
    ("electropop", "Pop"),
    ("bedroom pop", "Pop"),
    ("art pop", "Pop"),
    ("power pop", "Pop"),
    // Rock
    ("rock", "Rock"),
    ("indie rock", "Rock"),
    ("alternative rock", "Rock"),
    ("punk rock", "Rock"),
    ("hard rock", "Rock"),
    ("soft rock", "Rock"),
    ("classic rock", "Rock"),
    ("progressive rock", "Rock"),
    ("psychedelic rock", "Rock"),
    ("garage rock", "Rock"),
    ("folk rock", "Rock"),
    ("punk", "Rock"),
    ("metal", "Metal"),
    ("heavy metal", "Metal"),
    ("death metal", "Metal"),
    ("black metal", "Metal"),
    // Electronic
    ("electronic", "Electronic"),
    ("house", "Electronic"),
    ("techno", "Electronic"),
    ("trance", "Electronic"),
    ("drum and bass", "Electronic"),
    ("dnb", "Electronic"),
    ("dubstep", "Electronic"),
    ("edm", "Electronic"),
    ("ambient", "Electronic"),
    ("downtempo", "Electronic"),
    ("chillwave", "Electronic"),
    ("synthwave", "Electronic"),
    ("vaporwave", "Electronic"),
    ("future bass", "Electronic"),
    // Trap sits closer to hip-hop than to EDM
    ("trap", "Hip-Hop"),
    // Hip-Hop
    ("hip hop", "Hip-Hop"),
    ("hip-hop", "Hip-Hop"),
    ("rap", "Hip-Hop"),
    ("gangsta rap", "Hip-Hop"),
    ("conscious hip hop", "Hip-Hop"),
    ("old school hip hop", "Hip-Hop"),
    // R&B
    ("r&b", "R&B"),
    ("rhythm and blues", "R&B"),
    ("neo soul", "R&B"),
    ("contemporary r&b", "R&B"),
    ("alternative r&b", "R&B"),
    ("soul", "R&B"),
    // Jazz
    ("jazz", "Jazz"),
    ("smooth jazz", "Jazz"),
    ("jazz fusion", "Jazz"),
    ("bebop", "Jazz"),
    ("swing", "Jazz"),
    // Folk / Indie
    ("folk", "Folk"),
    ("indie", "Indie"),
    ("indie folk", "Folk"),
    ("americana", "Folk"),
    ("singer-songwriter", "Folk"),
    ("acoustic", "Folk"),
    // Everything else
    ("country", "Country"),
    ("blues", "Blues"),
    ("reggae", "Reggae"),
    ("classical", "Classical"),
    ("lo-fi", "Lo-Fi"),
    ("lofi", "Lo-Fi"),
    ("chill", "Chill"),
    ("alternative", "Alternative"),
    ("latin", "Latin"),
    ("world", "World Music"),
    ("funk", "Funk"),
    ("disco", "Disco"),
];

/// Substring rules applied when no exact match exists, first match wins.
///
/// The order encodes precedence: specific multi-word genres come before the
/// generic single-word catch-alls at the end, so "indie rock" resolves to
/// "Rock" via its specific rule instead of falling through to "indie".
/// Do not reorder or deduplicate.
const PRIORITY_RULES: &[(&str, &str)] = &[
    // Specific electronic styles
    ("house", "Electronic"),
    ("techno", "Electronic"),
    ("trance", "Electronic"),
    ("dubstep", "Electronic"),
    ("drum and bass", "Electronic"),
    ("dnb", "Electronic"),
    // Specific rock styles
    ("indie rock", "Rock"),
    ("alternative rock", "Rock"),
    ("punk rock", "Rock"),
    ("hard rock", "Rock"),
    ("metal", "Metal"),
    // Specific pop styles
    ("k-pop", "Pop"),
    ("j-pop", "Pop"),
    ("dance pop", "Pop"),
    ("indie pop", "Pop"),
    // Hip-Hop
    ("hip hop", "Hip-Hop"),
    ("hip-hop", "Hip-Hop"),
    ("rap", "Hip-Hop"),
    // R&B
    ("r&b", "R&B"),
    ("soul", "R&B"),
    ("neo soul", "R&B"),
    // Other specific styles
    ("indie folk", "Folk"),
    ("folk rock", "Rock"),
    ("jazz fusion", "Jazz"),
    ("smooth jazz", "Jazz"),
    ("country rock", "Country"),
    ("blues rock", "Blues"),
    // Generic catch-alls, checked last
    ("electronic", "Electronic"),
    ("pop", "Pop"),
    ("rock", "Rock"),
    ("indie", "Indie"),
    ("folk", "Folk"),
    ("jazz", "Jazz"),
    ("blues", "Blues"),
    ("country", "Country"),
    ("classical", "Classical"),
    ("latin", "Latin"),
    ("reggae", "Reggae"),
    ("alternative", "Alternative"),
    ("chill", "Chill"),
    ("lo-fi", "Lo-Fi"),
    ("lofi", "Lo-Fi"),
    ("ambient", "Electronic"),
    ("funk", "Funk"),
    ("disco", "Disco"),
];

static EXACT_LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| GENRE_BUCKET_MAP.iter().copied().collect());

/// Maps a raw genre tag to its display bucket.
///
/// Matching happens in strict order:
/// 1. The empty string maps to `"Unknown"`.
/// 2. Exact lookup of the lower-cased, trimmed tag in [`GENRE_BUCKET_MAP`].
/// 3. First matching substring rule from [`PRIORITY_RULES`].
/// 4. Fallback: tags of at most 15 characters are returned title-cased so
///    niche genres keep their own label; longer unmatched tags collapse
///    into `"Other"`.
///
/// # Example
///
/// ```
/// assert_eq!(classify("Indie Rock"), "Rock");
/// assert_eq!(classify("shoegaze"), "Shoegaze");
/// ```
pub fn classify(genre: &str) -> String {
    if genre.is_empty() {
        return "Unknown".to_string();
    }

    let lowered = genre.to_lowercase();
    let lowered = lowered.trim();

    if let Some(bucket) = EXACT_LOOKUP.get(lowered) {
        return (*bucket).to_string();
    }

    for (keyword, bucket) in PRIORITY_RULES {
        if lowered.contains(keyword) {
            return (*bucket).to_string();
        }
    }

    if genre.chars().count() <= 15 {
        title_case(genre)
    } else {
        "Other".to_string()
    }
}

/// Title-cases a string: a letter is uppercased when it does not follow
/// another letter and lowercased otherwise, so "post-rock" becomes
/// "Post-Rock" and "r&b" becomes "R&B".
fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_was_letter = false;

    for c in input.chars() {
        if c.is_alphabetic() {
            if prev_was_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_was_letter = true;
        } else {
            out.push(c);
            prev_was_letter = false;
        }
    }

    out
}
