use reqwest::Client;

use crate::{
    config,
    error::Result,
    info,
    spotify::{self, auth::TokenProvider},
    types::{ArtistObject, SeveralArtistsResponse},
};

/// The several-artists endpoint accepts at most 50 ids per request.
pub const ARTISTS_BATCH: usize = 50;

/// Fetches artist metadata for the given ids, batched per the API limit.
///
/// Ids the API cannot resolve come back as `null` entries and are dropped;
/// attribution rows are only written for artists that actually resolved.
pub async fn fetch_artists(
    client: &Client,
    tokens: &TokenProvider,
    artist_ids: &[String],
) -> Result<Vec<ArtistObject>> {
    let mut all_artists = Vec::with_capacity(artist_ids.len());

    for batch in artist_ids.chunks(ARTISTS_BATCH) {
        info!("Getting a batch of {} artists", batch.len());

        let url = format!("{}/artists?ids={}", config::spotify_apiurl(), batch.join(","));
        let response: SeveralArtistsResponse = spotify::get_json(client, tokens, &url).await?;
        all_artists.extend(response.artists.into_iter().flatten());
    }

    Ok(all_artists)
}
