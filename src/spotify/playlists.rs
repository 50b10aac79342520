use reqwest::Client;

use crate::{
    config,
    error::{Error, Result},
    info,
    spotify::{self, auth::TokenProvider},
    types::{PlaylistResponse, TrackObject, TrackPage},
};

/// Ceiling on the number of track pages followed per playlist. A buggy or
/// malicious `next` cursor must not keep the sync looping forever; at 100
/// items per page this still allows playlists far beyond Spotify's own
/// 10,000-track limit.
pub const MAX_TRACK_PAGES: u32 = 200;

/// Fetches playlist metadata together with the first page of its tracks.
///
/// # Errors
///
/// Returns `NotFound` when the remote API answers 404 for the id, `Upstream`
/// for other non-success statuses.
pub async fn fetch_playlist(
    client: &Client,
    tokens: &TokenProvider,
    playlist_id: &str,
) -> Result<PlaylistResponse> {
    info!("Fetching playlist: {}", playlist_id);

    let url = format!("{}/playlists/{}", config::spotify_apiurl(), playlist_id);
    match spotify::get_json(client, tokens, &url).await {
        Err(Error::NotFound(_)) => Err(Error::NotFound(format!(
            "Playlist not found: {}",
            playlist_id
        ))),
        other => other,
    }
}

/// Collects the complete current track list of a playlist.
///
/// Starts from the track page embedded in the playlist response and follows
/// the `next` cursor until the API reports no further page, preserving the
/// remote order. Items whose track is absent or has no id (removed or local
/// tracks) are skipped.
///
/// # Errors
///
/// Returns `PageLimit` if more than [`MAX_TRACK_PAGES`] pages are seen, on
/// the assumption that the cursor chain is broken.
pub async fn fetch_all_tracks(
    client: &Client,
    tokens: &TokenProvider,
    playlist: &PlaylistResponse,
) -> Result<Vec<TrackObject>> {
    let mut all_tracks = page_tracks(&playlist.tracks);
    let mut next = playlist.tracks.next.clone();
    let mut pages: u32 = 1;

    while let Some(url) = next {
        if pages >= MAX_TRACK_PAGES {
            return Err(Error::PageLimit(MAX_TRACK_PAGES));
        }

        info!("Getting another page of tracks");
        let page: TrackPage = spotify::get_json(client, tokens, &url).await?;
        all_tracks.extend(page_tracks(&page));
        next = page.next;
        pages += 1;
    }

    Ok(all_tracks)
}

fn page_tracks(page: &TrackPage) -> Vec<TrackObject> {
    page.items
        .iter()
        .filter_map(|item| item.track.clone())
        .filter(|track| track.id.is_some())
        .collect()
}
