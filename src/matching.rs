use crate::clients::youtube::SearchHit;

/// How many search candidates are requested per track.
pub const SEARCH_LIMIT: u32 = 5;

/// Outcome of locating a video for one (title, artist) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackMatch {
    Found { url: String },
    NotFound { reason: String },
}

/// Compose the search query submitted for a track.
///
/// Both parts are quoted, matching the query the search service scores
/// candidates against.
pub fn search_query(title: &str, artist: &str) -> String {
    format!("\"{title}\" \"{artist}\"")
}

/// Pick one candidate for a track out of the search results.
///
/// Candidates are scanned in the order the service returned them; the first
/// whose title contains both the track title and the artist name
/// (case-insensitively) wins. When none qualifies, the first candidate is
/// taken regardless of quality. Only an empty candidate list yields
/// `NotFound`. This is a heuristic: false positives and negatives happen.
pub fn resolve(title: &str, artist: &str, candidates: &[SearchHit]) -> TrackMatch {
    let Some(first) = candidates.first() else {
        return TrackMatch::NotFound {
            reason: "no match found".to_string(),
        };
    };

    let title = title.to_lowercase();
    let artist = artist.to_lowercase();
    let hit = candidates
        .iter()
        .find(|hit| {
            let candidate = hit.title.to_lowercase();
            candidate.contains(&title) && candidate.contains(&artist)
        })
        .unwrap_or(first);

    TrackMatch::Found {
        url: hit.url.clone(),
    }
}
