//! # Spotify Integration Module
//!
//! Read-side client for the Spotify Web API. Each submodule covers one
//! domain of the catalog:
//!
//! - [`auth`] - Client-credentials token provider with in-process caching
//! - [`playlists`] - Playlist metadata and paginated track listing
//! - [`tracks`] - Batched audio-feature retrieval
//! - [`artists`] - Batched artist metadata retrieval
//!
//! All requests funnel through [`get_json`], which attaches a bearer token,
//! maps upstream failures onto the crate's error taxonomy (404 becomes
//! `NotFound`, any other non-2xx becomes `Upstream` with the status echoed),
//! and retries a bounded number of times on rate limits and server errors.
//!
//! ## API Coverage
//!
//! - `GET /playlists/{id}` - Playlist detail with the first track page
//! - `GET ` + embedded `next` cursor - Subsequent track pages
//! - `GET /audio-features?ids=...` - Audio features, up to 100 ids per call
//! - `GET /artists?ids=...` - Artist metadata, up to 50 ids per call
//! - `POST /api/token` - Client-credentials token exchange

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    error::{Error, Result},
    warning,
};

pub mod artists;
pub mod auth;
pub mod playlists;
pub mod tracks;

use auth::TokenProvider;

/// Maximum retries per request before the upstream error propagates.
const MAX_RETRIES: u32 = 2;

/// Rate-limit delays above this are not worth waiting out.
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Performs an authenticated GET against the Spotify Web API and decodes the
/// JSON response.
///
/// # Errors
///
/// - `NotFound` when the API returns 404
/// - `Upstream` for any other non-2xx status, after retries are exhausted
/// - `Auth` when no bearer token could be obtained
/// - `Http` for network-level failures
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    tokens: &TokenProvider,
    url: &str,
) -> Result<T> {
    let mut attempts = 0;

    loop {
        let token = tokens.bearer_token(client).await?;
        let response = client.get(url).bearer_auth(token).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("Resource not found: {}", url)));
        }

        if attempts < MAX_RETRIES {
            if let Some(delay) = retry_delay(&response) {
                attempts += 1;
                warning!(
                    "Upstream returned {}, retrying in {} seconds (attempt {}/{})",
                    status,
                    delay.as_secs(),
                    attempts,
                    MAX_RETRIES
                );
                sleep(delay).await;
                continue;
            }
        }

        return Err(Error::Upstream {
            status: status.as_u16(),
        });
    }
}

/// Decides whether a failed response is worth retrying, and how long to wait.
///
/// 429 responses are retried after the `Retry-After` delay unless the API
/// asks for more than [`MAX_RETRY_AFTER_SECS`]; 5xx responses honor a
/// `Retry-After` header when one is present and otherwise wait a flat ten
/// seconds. Everything else propagates immediately.
fn retry_delay(response: &Response) -> Option<Duration> {
    let status = response.status();
    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    if status == StatusCode::TOO_MANY_REQUESTS {
        // The API always sends Retry-After on 429; if it's somehow missing,
        // back off a second instead of retrying immediately.
        let secs = retry_after.unwrap_or(1);
        if secs <= MAX_RETRY_AFTER_SECS {
            return Some(Duration::from_secs(secs));
        }
        warning!(
            "Retry after has reached an abnormal high of {} seconds. Giving up on this request.",
            secs
        );
        return None;
    }

    if status.is_server_error() {
        let secs = retry_after.unwrap_or(10).min(MAX_RETRY_AFTER_SECS);
        return Some(Duration::from_secs(secs));
    }

    None
}
