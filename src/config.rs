//! Configuration management for the playlist sync service.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and a `.env` file in the working directory. The
//! configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. Application defaults (where applicable)
//!
//! The Spotify client credentials are the only values without a default;
//! [`require_credentials`] is called once at startup so a misconfigured
//! deployment fails at boot instead of on the first sync request.

use std::env;

use crate::error::{Error, Result};

/// Loads environment variables from a `.env` file in the working directory.
///
/// Missing files are not an error; a deployment may provide everything
/// through the process environment.
pub fn load_env() {
    dotenv::dotenv().ok();
}

/// Validates that the required Spotify credentials are present.
///
/// Returns `Err(Error::Config)` naming the missing variable. Called from
/// `main` before the server starts accepting requests.
pub fn require_credentials() -> Result<()> {
    for var in ["SPOTIFY_CLIENT_ID", "SPOTIFY_CLIENT_SECRET"] {
        if env::var(var).is_err() {
            return Err(Error::Config(format!("{} must be set", var)));
        }
    }
    Ok(())
}

/// Returns the Spotify API client id used for the client-credentials exchange.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_ID` environment variable is not set. The
/// startup check in [`require_credentials`] guarantees this cannot happen
/// once the server is serving requests.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_CLIENT_ID").expect("SPOTIFY_CLIENT_ID must be set")
}

/// Returns the Spotify API client secret used for the client-credentials exchange.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_SECRET` environment variable is not set.
pub fn spotify_client_secret() -> String {
    env::var("SPOTIFY_CLIENT_SECRET").expect("SPOTIFY_CLIENT_SECRET must be set")
}

/// Returns the Spotify Web API base URL.
///
/// Overridable through `SPOTIFY_API_URL`, which the integration tests use to
/// point the client at a local mock catalog.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the Spotify token exchange URL.
///
/// Overridable through `SPOTIFY_API_TOKEN_URL`.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the database connection URL.
///
/// Defaults to a SQLite file in the working directory, created on first use.
pub fn database_url() -> String {
    env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://spotsync.db?mode=rwc".to_string())
}

/// Returns the address and port the HTTP server binds to.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".to_string())
}
