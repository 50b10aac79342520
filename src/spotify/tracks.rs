use reqwest::Client;

use crate::{
    config,
    error::Result,
    info,
    spotify::{self, auth::TokenProvider},
    types::{AudioFeatures, AudioFeaturesResponse},
};

/// The audio-features endpoint accepts at most 100 ids per request.
pub const AUDIO_FEATURES_BATCH: usize = 100;

/// Fetches audio features for the given track ids, batched per the API limit.
///
/// Results are concatenated positionally: the entry at index `i` belongs to
/// `track_ids[i]`. The API reports unknown or analysis-less tracks as `null`
/// entries, which come back as `None` and must be stored as an all-absent
/// feature set rather than treated as an error.
pub async fn fetch_audio_features(
    client: &Client,
    tokens: &TokenProvider,
    track_ids: &[String],
) -> Result<Vec<Option<AudioFeatures>>> {
    let mut all_features = Vec::with_capacity(track_ids.len());

    for batch in track_ids.chunks(AUDIO_FEATURES_BATCH) {
        info!("Getting a batch of {} tracks' audio features", batch.len());

        let url = format!(
            "{}/audio-features?ids={}",
            config::spotify_apiurl(),
            batch.join(",")
        );
        let response: AudioFeaturesResponse = spotify::get_json(client, tokens, &url).await?;
        all_features.extend(response.audio_features);
    }

    Ok(all_features)
}
