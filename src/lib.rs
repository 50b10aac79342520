//! Spotify Playlist Sync Service Library
//!
//! This library implements a small synchronization service: given a Spotify
//! playlist id (or share URL), it pulls playlist, track, and artist data from
//! the Spotify Web API, normalizes it, and upserts it into a relational
//! store. Membership sets (playlist↔track, track↔artist) are kept in step
//! with the remote catalog, and derived read views (top artists, top genres,
//! total duration) are computed for response payloads.
//!
//! # Modules
//!
//! - `aggregate` - Read-side aggregates over stored membership
//! - `api` - HTTP API endpoints served by the sync service
//! - `config` - Configuration management and environment variables
//! - `db` - Persistence gateway over the relational store
//! - `error` - Error taxonomy shared across the crate
//! - `server` - HTTP server wiring
//! - `spotify` - Spotify Web API client implementation
//! - `sync` - Playlist synchronization orchestrator
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod aggregate;
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod server;
pub mod spotify;
pub mod sync;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Fetching playlist: {}", playlist_id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations.
///
/// # Example
///
/// ```
/// success!("Playlist ({}) synced to database", name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Used for unrecoverable startup errors (bad configuration, unreachable
/// database) where continuing makes no sense. Request-scoped failures go
/// through the crate's typed errors instead and never terminate the process.
///
/// # Example
///
/// ```
/// error!("Failed to connect to database: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues or important information that users should
/// notice, such as rate-limit delays or retried upstream calls.
///
/// # Example
///
/// ```
/// warning!("Rate limited, retrying in {} seconds", delay);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
