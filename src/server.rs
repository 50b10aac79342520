use axum::{
    Extension, Router,
    routing::{delete, get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};

use crate::{api, config, db::Store, error, info, spotify::auth::TokenProvider};

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub tokens: Arc<TokenProvider>,
    pub http: reqwest::Client,
}

pub async fn start_api_server(state: AppState) {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/playlist", post(api::sync_playlist))
        .route("/playlists", get(api::get_playlists))
        .route("/tracks", get(api::get_tracks))
        .route("/artists", get(api::get_artists))
        .route("/reset", delete(api::reset_database))
        .layer(Extension(state));

    let addr = match SocketAddr::from_str(&config::server_addr()) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
