use std::collections::{HashMap, HashSet};

use crate::types::{CountEntry, Image};

/// Extracts a playlist id from raw user input.
///
/// Accepts either a bare playlist id or a share URL such as
/// `https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc`; the id
/// is the trailing path segment with any query string stripped.
pub fn parse_playlist_id(input: &str) -> String {
    let trimmed = input.trim().trim_end_matches('/');
    let last = trimmed.rsplit('/').next().unwrap_or(trimmed);
    last.split('?').next().unwrap_or(last).to_string()
}

/// Computes the membership delta between the stored and remote track id sets.
///
/// Returns `(to_add, to_remove)`: ids present remotely but not stored, and
/// ids stored but no longer present remotely. A pure set difference; applying
/// both makes the stored set equal the remote set exactly.
pub fn membership_diff(
    stored: &HashSet<String>,
    remote: &HashSet<String>,
) -> (Vec<String>, Vec<String>) {
    let to_add = remote.difference(stored).cloned().collect();
    let to_remove = stored.difference(remote).cloned().collect();
    (to_add, to_remove)
}

/// Tallies genre occurrences weighted by each artist's track count.
///
/// Each entry is an artist's comma-joined genre string paired with the number
/// of tracks that artist has in the playlist; every genre of an artist counts
/// once per track. Returns the top `n` genres by count descending. Ties keep
/// an arbitrary but stable order.
pub fn tally_genres(artists: &[(String, i64)], n: usize) -> Vec<CountEntry> {
    let mut counts: HashMap<String, i64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for (genres, num_tracks) in artists {
        for genre in genres.split(',') {
            let genre = genre.trim();
            if genre.is_empty() {
                continue;
            }
            if !counts.contains_key(genre) {
                order.push(genre.to_string());
            }
            *counts.entry(genre.to_string()).or_insert(0) += num_tracks;
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    order.sort_by_key(|genre| -counts[genre]);
    order
        .into_iter()
        .take(n)
        .map(|name| {
            let count = counts[&name];
            CountEntry { name, count }
        })
        .collect()
}

/// Returns the URL of the first image in an image list, if any.
///
/// Spotify returns images largest-first, so the first entry is the thumbnail
/// used throughout the schema.
pub fn first_image_url(images: &Option<Vec<Image>>) -> Option<String> {
    images
        .as_ref()
        .and_then(|imgs| imgs.first())
        .map(|img| img.url.clone())
}
