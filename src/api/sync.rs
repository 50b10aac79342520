use axum::{Extension, response::Json};

use crate::{
    error::Error,
    info,
    server::AppState,
    success, sync,
    types::{SyncRequest, SyncResponse},
    utils,
};

/// Syncs one playlist into the store.
///
/// The body carries either `{"id": ...}` or `{"url": ...}`; for a URL the
/// playlist id is the trailing path segment with the query string stripped.
pub async fn sync_playlist(
    Extension(state): Extension<AppState>,
    Json(request): Json<SyncRequest>,
) -> Result<Json<SyncResponse>, Error> {
    let raw = request.id.or(request.url).ok_or_else(|| {
        Error::BadRequest("Request body must contain an \"id\" or \"url\" field".to_string())
    })?;
    let playlist_id = utils::parse_playlist_id(&raw);

    info!("Syncing playlist: {}", playlist_id);
    let summary =
        sync::sync_playlist(&state.http, &state.tokens, &state.store, &playlist_id).await?;
    success!("Playlist ({}) synced to database", summary.title);

    Ok(Json(SyncResponse {
        message: "Playlist successfully synced to database".to_string(),
        data: summary,
    }))
}
