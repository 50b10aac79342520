use axum::{Extension, response::Json};

use crate::{
    db::{
        self,
        models::{ArtistRecord, PlaylistRecord, TrackRecord},
    },
    error::Error,
    server::AppState,
};

pub async fn get_playlists(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<PlaylistRecord>>, Error> {
    Ok(Json(db::all_playlists(state.store.pool()).await?))
}

pub async fn get_tracks(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<TrackRecord>>, Error> {
    Ok(Json(db::all_tracks(state.store.pool()).await?))
}

pub async fn get_artists(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<ArtistRecord>>, Error> {
    Ok(Json(db::all_artists(state.store.pool()).await?))
}
