//! Read-side aggregates computed from stored membership.
//!
//! Everything here is derived data for response payloads: which artists
//! dominate a playlist, which genres they drag in with them, and how long
//! the whole thing runs. Tie-breaks within equal counts follow the stable
//! order the store returns (artist name ascending), which is documented as
//! arbitrary-but-stable rather than a total order.

use crate::{
    db::{
        self, Store,
        models::{ArtistTally, PlaylistRecord},
    },
    error::Result,
    types::{CountEntry, PlaylistSummary},
    utils,
};

/// How many artists and genres a playlist summary reports.
pub const TOP_N: usize = 5;

/// Returns the `n` artists with the most member tracks in the playlist.
///
/// The tallies are already ordered by track count descending, so this is a
/// straight prefix.
pub fn top_artists(tallies: &[ArtistTally], n: usize) -> Vec<CountEntry> {
    tallies
        .iter()
        .take(n)
        .map(|tally| CountEntry {
            name: tally.name.clone(),
            count: tally.num_tracks,
        })
        .collect()
}

/// Returns the `n` most frequent genres across the playlist's artists.
///
/// Each artist's comma-joined genre list is exploded and every genre is
/// weighted by that artist's track count, so an artist with three member
/// tracks contributes three occurrences of each of their genres.
pub fn top_genres(tallies: &[ArtistTally], n: usize) -> Vec<CountEntry> {
    let weighted: Vec<(String, i64)> = tallies
        .iter()
        .filter_map(|tally| {
            tally
                .genres
                .clone()
                .map(|genres| (genres, tally.num_tracks))
        })
        .collect();
    utils::tally_genres(&weighted, n)
}

/// Builds the response summary for a freshly synced playlist.
pub async fn playlist_summary(
    store: &Store,
    playlist: &PlaylistRecord,
    track_count: usize,
) -> Result<PlaylistSummary> {
    let duration = db::playlist_duration_secs(store.pool(), &playlist.id).await?;
    let tallies = db::playlist_artist_counts(store.pool(), &playlist.id).await?;

    Ok(PlaylistSummary {
        title: playlist.name.clone(),
        description: playlist.description.clone(),
        follower_count: playlist.followers_count,
        track_count,
        image_url: playlist.thumbnail.clone(),
        duration,
        top_genres: top_genres(&tallies, TOP_N),
        top_artists: top_artists(&tallies, TOP_N),
    })
}
