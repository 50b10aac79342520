//! Error taxonomy shared across the crate.
//!
//! Every failure a request can hit maps onto one of these variants, and the
//! [`axum::response::IntoResponse`] impl turns them into JSON error bodies
//! with the appropriate status code. Remote-call failures surface as 502
//! with the upstream status echoed in the message; unknown playlists are the
//! only 404.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream API returned status {status}")]
    Upstream { status: u16 },

    #[error("Pagination exceeded {0} pages, aborting sync")]
    PageLimit(u32),

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Auth(_) | Error::Upstream { .. } | Error::PageLimit(_) | Error::Http(_) => {
                StatusCode::BAD_GATEWAY
            }
            Error::Persistence(_) | Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "message": self.to_string() }));
        (status, body).into_response()
    }
}
