//! Playlist synchronization orchestrator.
//!
//! One sync runs five sequential phases with no branching back:
//!
//! 1. Fetch remote state: playlist metadata plus the complete track list.
//! 2. Diff the remote track id set against stored membership.
//! 3. For tracks new to the store (a second filter beyond the membership
//!    diff, since a track may already be known from another playlist), fetch
//!    audio features and any unknown artists in batches.
//! 4. Apply every write of the sync inside a single transaction: playlist
//!    upsert, membership removals, new track/artist/attribution rows, and
//!    membership additions. A failure anywhere rolls the sync back, so
//!    membership is never observable half-updated.
//! 5. Recompute the read-side aggregates for the response payload.
//!
//! After a sync the membership table for the playlist equals the remote
//! track id set exactly; the track and artist master tables only ever grow.
//! Tracks dropped from the playlist keep their rows, which makes re-adding
//! them later free.

use std::collections::HashSet;

use reqwest::Client;

use crate::{
    aggregate,
    db::{
        self, Store,
        models::{ArtistRecord, PlaylistRecord, TrackRecord},
    },
    error::Result,
    spotify::{self, auth::TokenProvider},
    types::{ArtistObject, AudioFeatures, PlaylistSummary, TrackObject},
    utils,
};

/// Synchronizes one playlist from the remote catalog into the store and
/// returns the summary used in the response payload.
pub async fn sync_playlist(
    client: &Client,
    tokens: &TokenProvider,
    store: &Store,
    playlist_id: &str,
) -> Result<PlaylistSummary> {
    // Phase 1: remote state.
    let playlist = spotify::playlists::fetch_playlist(client, tokens, playlist_id).await?;
    let remote_tracks = spotify::playlists::fetch_all_tracks(client, tokens, &playlist).await?;

    let playlist_record = PlaylistRecord {
        id: playlist.id.clone(),
        name: playlist.name.clone(),
        description: playlist.description.clone(),
        thumbnail: utils::first_image_url(&playlist.images),
        followers_count: playlist.followers.as_ref().and_then(|f| f.total),
    };

    // Phase 2: membership diff.
    let remote_ids: HashSet<String> = remote_tracks
        .iter()
        .filter_map(|track| track.id.clone())
        .collect();
    let stored_ids = db::playlist_track_ids(store.pool(), &playlist.id).await?;
    let (to_add, to_remove) = utils::membership_diff(&stored_ids, &remote_ids);

    // Phase 3: fetch what the store doesn't know yet. Tracks already known
    // from another playlist are not re-fetched; their captured attributes
    // are immutable.
    let known_tracks = db::existing_track_ids(store.pool(), &to_add).await?;
    let new_tracks = select_new_tracks(&remote_tracks, &stored_ids, &known_tracks);

    let new_track_ids: Vec<String> = new_tracks.iter().map(|(id, _)| id.clone()).collect();
    let features = spotify::tracks::fetch_audio_features(client, tokens, &new_track_ids).await?;
    let track_records: Vec<TrackRecord> = new_tracks
        .iter()
        .zip(features)
        .map(|((id, track), features)| build_track_record(id, *track, features.unwrap_or_default()))
        .collect();

    let credited = credited_artist_ids(&new_tracks);
    let known_artists = db::existing_artist_ids(store.pool(), &credited).await?;
    let missing: Vec<String> = credited
        .iter()
        .filter(|id| !known_artists.contains(*id))
        .cloned()
        .collect();
    let fetched_artists = spotify::artists::fetch_artists(client, tokens, &missing).await?;
    let artist_records: Vec<ArtistRecord> =
        fetched_artists.iter().map(build_artist_record).collect();

    // Attribution rows may only reference artists that exist after this
    // sync: known ones plus those that resolved remotely.
    let mut resolved: HashSet<String> = known_artists;
    resolved.extend(fetched_artists.iter().map(|a| a.id.clone()));
    let attribution = attribution_pairs(&new_tracks, &resolved);

    // Phase 4: apply all writes atomically.
    let mut tx = store.begin().await?;
    db::upsert_playlist(&mut tx, &playlist_record).await?;
    db::remove_playlist_tracks(&mut tx, &playlist.id, &to_remove).await?;
    db::insert_artists(&mut tx, &artist_records).await?;
    db::insert_tracks(&mut tx, &track_records).await?;
    db::insert_track_artists(&mut tx, &attribution).await?;
    db::insert_playlist_tracks(&mut tx, &playlist.id, &to_add).await?;
    tx.commit().await?;

    // Phase 5: read-side aggregates for the response.
    aggregate::playlist_summary(store, &playlist_record, remote_ids.len()).await
}

/// Picks the remote tracks that need a row in the track table: members the
/// playlist gained that no other playlist has introduced yet, deduplicated
/// in remote order.
fn select_new_tracks<'a>(
    remote_tracks: &'a [TrackObject],
    stored_ids: &HashSet<String>,
    known_ids: &HashSet<String>,
) -> Vec<(String, &'a TrackObject)> {
    let mut seen = HashSet::new();
    let mut new_tracks = Vec::new();

    for track in remote_tracks {
        let Some(id) = &track.id else { continue };
        if stored_ids.contains(id) || known_ids.contains(id) || !seen.insert(id.clone()) {
            continue;
        }
        new_tracks.push((id.clone(), track));
    }

    new_tracks
}

fn credited_artist_ids(new_tracks: &[(String, &TrackObject)]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for (_, track) in new_tracks {
        for artist in &track.artists {
            if let Some(id) = &artist.id {
                if seen.insert(id.clone()) {
                    ids.push(id.clone());
                }
            }
        }
    }

    ids
}

fn attribution_pairs(
    new_tracks: &[(String, &TrackObject)],
    resolved_artists: &HashSet<String>,
) -> Vec<(String, String)> {
    new_tracks
        .iter()
        .flat_map(|(track_id, track)| {
            track.artists.iter().filter_map(|artist| {
                artist
                    .id
                    .as_ref()
                    .filter(|id| resolved_artists.contains(*id))
                    .map(|id| (track_id.clone(), id.clone()))
            })
        })
        .collect()
}

fn build_track_record(id: &str, track: &TrackObject, features: AudioFeatures) -> TrackRecord {
    let thumbnail = track
        .album
        .as_ref()
        .and_then(|album| utils::first_image_url(&album.images));

    TrackRecord {
        id: id.to_string(),
        name: track.name.clone(),
        thumbnail,
        preview_url: track.preview_url.clone(),
        popularity: track.popularity,
        danceability: features.danceability,
        energy: features.energy,
        loudness: features.loudness,
        speechiness: features.speechiness,
        acousticness: features.acousticness,
        instrumentalness: features.instrumentalness,
        liveness: features.liveness,
        valence: features.valence,
        tempo: features.tempo,
        mode: features.mode,
        duration_ms: track.duration_ms,
    }
}

fn build_artist_record(artist: &ArtistObject) -> ArtistRecord {
    ArtistRecord {
        id: artist.id.clone(),
        name: artist.name.clone(),
        thumbnail: utils::first_image_url(&artist.images),
        popularity: artist.popularity,
        genres: Some(artist.genres.join(",")),
    }
}
