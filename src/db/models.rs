use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlaylistRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub followers_count: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TrackRecord {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<String>,
    pub preview_url: Option<String>,
    pub popularity: Option<i64>,
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub loudness: Option<f64>,
    pub speechiness: Option<f64>,
    pub acousticness: Option<f64>,
    pub instrumentalness: Option<f64>,
    pub liveness: Option<f64>,
    pub valence: Option<f64>,
    pub tempo: Option<f64>,
    pub mode: Option<i64>,
    pub duration_ms: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ArtistRecord {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<String>,
    pub popularity: Option<i64>,
    pub genres: Option<String>,
}

/// One artist's presence within a playlist: how many member tracks credit
/// them, plus the genre string needed for the genre tally.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArtistTally {
    pub name: String,
    pub genres: Option<String>,
    pub num_tracks: i64,
}
