//! # API Module
//!
//! HTTP endpoints served by the sync service.
//!
//! ## Endpoints
//!
//! ### Synchronization
//!
//! - [`sync_playlist`] - `POST /playlist`: syncs one playlist from the
//!   remote catalog into the store and returns its summary.
//!
//! ### Catalog dumps
//!
//! - [`get_playlists`] / [`get_tracks`] / [`get_artists`] - full table dumps
//!   as JSON arrays.
//!
//! ### Maintenance
//!
//! - [`reset_database`] - `DELETE /reset`: drops and recreates all tables.
//! - [`health`] - application status and version for monitoring.
//!
//! Handlers return `Result<Json<T>, Error>`; the error taxonomy maps itself
//! onto HTTP statuses in its `IntoResponse` impl.

mod catalog;
mod health;
mod reset;
mod sync;

pub use catalog::{get_artists, get_playlists, get_tracks};
pub use health::health;
pub use reset::reset_database;
pub use sync::sync_playlist;
