use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config,
    error::{Error, Result},
    info,
};

/// Tokens are refreshed this many seconds before their reported expiry so a
/// request never goes out with a token about to lapse mid-flight.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: i64,
}

/// Caches a client-credentials bearer token for the Spotify Web API.
///
/// The token and its expiry live behind a mutex, so concurrent requests
/// serialize on refresh instead of racing to issue duplicate exchanges. The
/// clock is injected as a plain function so expiry behavior can be tested
/// without waiting an hour.
pub struct TokenProvider {
    clock: fn() -> i64,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new() -> Self {
        Self::with_clock(|| Utc::now().timestamp())
    }

    pub fn with_clock(clock: fn() -> i64) -> Self {
        TokenProvider {
            clock,
            cached: Mutex::new(None),
        }
    }

    /// Returns a valid access token, performing the client-credentials
    /// exchange if the cached one is absent or past its safety margin.
    ///
    /// # Errors
    ///
    /// Returns `Error::Auth` when the exchange responds with a non-success
    /// status or the response body lacks an `access_token`.
    pub async fn bearer_token(&self, client: &Client) -> Result<String> {
        let mut cached = self.cached.lock().await;
        let now = (self.clock)();

        if let Some(token) = cached.as_ref() {
            if now < token.expires_at {
                return Ok(token.access_token.clone());
            }
        }

        let token = request_token(client, now).await?;
        let access_token = token.access_token.clone();
        *cached = Some(token);
        Ok(access_token)
    }
}

impl Default for TokenProvider {
    fn default() -> Self {
        Self::new()
    }
}

async fn request_token(client: &Client, now: i64) -> Result<CachedToken> {
    let credentials = STANDARD.encode(format!(
        "{}:{}",
        config::spotify_client_id(),
        config::spotify_client_secret()
    ));

    let response = client
        .post(config::spotify_apitoken_url())
        .header("Authorization", format!("Basic {}", credentials))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Auth(format!(
            "Token exchange failed with status {}",
            status
        )));
    }

    let json: Value = response.json().await?;
    let access_token = json["access_token"]
        .as_str()
        .ok_or_else(|| Error::Auth("Token response missing access_token".to_string()))?
        .to_string();
    let expires_in = json["expires_in"].as_i64().unwrap_or(3600);

    info!("Generated a new Spotify token");

    Ok(CachedToken {
        access_token,
        expires_at: now + expires_in - EXPIRY_MARGIN_SECS,
    })
}
