//! Persistence gateway over the relational store.
//!
//! The schema lives in `schema.sql` and is applied statement-by-statement on
//! startup. Write operations take a `&mut SqliteConnection` so the sync
//! orchestrator can run every mutation of one sync inside a single
//! transaction; reads run directly on the pool.
//!
//! Upsert semantics differ per entity: playlists overwrite all mutable
//! fields on conflict, tracks and artists are insert-if-absent (their
//! attributes are treated as immutable once captured), and membership rows
//! ignore duplicate-key conflicts silently.

use std::collections::HashSet;
use std::str::FromStr;

use sqlx::{
    Pool, Sqlite, SqliteConnection, Transaction,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::error::Result;

pub mod models;

use models::{ArtistRecord, ArtistTally, PlaylistRecord, TrackRecord};

const SCHEMA: &str = include_str!("schema.sql");

const DROP_TABLES: &str = "
DROP TABLE IF EXISTS playlist_tracks;
DROP TABLE IF EXISTS track_artists;
DROP TABLE IF EXISTS playlists;
DROP TABLE IF EXISTS artists;
DROP TABLE IF EXISTS tracks;
";

#[derive(Clone)]
pub struct Store {
    pool: Pool<Sqlite>,
}

impl Store {
    /// Connects to the database at `url` and creates it if missing.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Opens an in-memory database on a single connection.
    ///
    /// A one-connection pool is required: every in-memory connection is its
    /// own database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Applies the schema, creating any missing tables.
    pub async fn init_schema(&self) -> Result<()> {
        run_statements(&self.pool, SCHEMA).await
    }

    /// Drops and recreates all tables.
    pub async fn reset(&self) -> Result<()> {
        run_statements(&self.pool, DROP_TABLES).await?;
        self.init_schema().await
    }

    /// Begins a transaction spanning one full sync's writes.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

async fn run_statements(pool: &Pool<Sqlite>, sql: &str) -> Result<()> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt).execute(pool).await?;
        }
    }
    Ok(())
}

/// Inserts the playlist row, overwriting all mutable fields on conflict.
pub async fn upsert_playlist(conn: &mut SqliteConnection, playlist: &PlaylistRecord) -> Result<()> {
    sqlx::query(
        "INSERT INTO playlists (id, name, description, thumbnail, followers_count)
         VALUES (?, ?, ?, ?, ?)
         ON CONFLICT (id) DO UPDATE
         SET name = excluded.name,
             description = excluded.description,
             thumbnail = excluded.thumbnail,
             followers_count = excluded.followers_count",
    )
    .bind(&playlist.id)
    .bind(&playlist.name)
    .bind(&playlist.description)
    .bind(&playlist.thumbnail)
    .bind(playlist.followers_count)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Inserts track rows, leaving already-known tracks untouched.
pub async fn insert_tracks(conn: &mut SqliteConnection, tracks: &[TrackRecord]) -> Result<()> {
    for track in tracks {
        sqlx::query(
            "INSERT OR IGNORE INTO tracks
             (id, name, thumbnail, preview_url, popularity, danceability, energy, loudness,
              speechiness, acousticness, instrumentalness, liveness, valence, tempo, mode,
              duration_ms)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&track.id)
        .bind(&track.name)
        .bind(&track.thumbnail)
        .bind(&track.preview_url)
        .bind(track.popularity)
        .bind(track.danceability)
        .bind(track.energy)
        .bind(track.loudness)
        .bind(track.speechiness)
        .bind(track.acousticness)
        .bind(track.instrumentalness)
        .bind(track.liveness)
        .bind(track.valence)
        .bind(track.tempo)
        .bind(track.mode)
        .bind(track.duration_ms)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Inserts artist rows, leaving already-known artists untouched.
pub async fn insert_artists(conn: &mut SqliteConnection, artists: &[ArtistRecord]) -> Result<()> {
    for artist in artists {
        sqlx::query(
            "INSERT OR IGNORE INTO artists (id, name, thumbnail, popularity, genres)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&artist.id)
        .bind(&artist.name)
        .bind(&artist.thumbnail)
        .bind(artist.popularity)
        .bind(&artist.genres)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Inserts (track, artist) attribution pairs; duplicates are ignored.
pub async fn insert_track_artists(
    conn: &mut SqliteConnection,
    pairs: &[(String, String)],
) -> Result<()> {
    for (track_id, artist_id) in pairs {
        sqlx::query("INSERT OR IGNORE INTO track_artists (track_id, artist_id) VALUES (?, ?)")
            .bind(track_id)
            .bind(artist_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

/// Inserts membership rows for `track_ids`; duplicates are ignored.
pub async fn insert_playlist_tracks(
    conn: &mut SqliteConnection,
    playlist_id: &str,
    track_ids: &[String],
) -> Result<()> {
    for track_id in track_ids {
        sqlx::query("INSERT OR IGNORE INTO playlist_tracks (playlist_id, track_id) VALUES (?, ?)")
            .bind(playlist_id)
            .bind(track_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

/// Removes membership rows for `track_ids`. The track rows themselves are
/// never deleted.
pub async fn remove_playlist_tracks(
    conn: &mut SqliteConnection,
    playlist_id: &str,
    track_ids: &[String],
) -> Result<()> {
    if track_ids.is_empty() {
        return Ok(());
    }
    let placeholders = vec!["?"; track_ids.len()].join(", ");
    let sql = format!(
        "DELETE FROM playlist_tracks WHERE playlist_id = ? AND track_id IN ({})",
        placeholders
    );
    let mut query = sqlx::query(&sql).bind(playlist_id);
    for track_id in track_ids {
        query = query.bind(track_id);
    }
    query.execute(&mut *conn).await?;
    Ok(())
}

/// Returns which of `track_ids` already exist in the track table.
pub async fn existing_track_ids(
    pool: &Pool<Sqlite>,
    track_ids: &[String],
) -> Result<HashSet<String>> {
    existing_ids(pool, "tracks", track_ids).await
}

/// Returns which of `artist_ids` already exist in the artist table.
pub async fn existing_artist_ids(
    pool: &Pool<Sqlite>,
    artist_ids: &[String],
) -> Result<HashSet<String>> {
    existing_ids(pool, "artists", artist_ids).await
}

async fn existing_ids(pool: &Pool<Sqlite>, table: &str, ids: &[String]) -> Result<HashSet<String>> {
    if ids.is_empty() {
        return Ok(HashSet::new());
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    // Table name is one of two compile-time constants, never user input.
    let sql = format!("SELECT id FROM {} WHERE id IN ({})", table, placeholders);
    let mut query = sqlx::query_scalar::<_, String>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    Ok(query.fetch_all(pool).await?.into_iter().collect())
}

/// Returns the stored membership set for a playlist.
pub async fn playlist_track_ids(pool: &Pool<Sqlite>, playlist_id: &str) -> Result<HashSet<String>> {
    let ids =
        sqlx::query_scalar::<_, String>("SELECT track_id FROM playlist_tracks WHERE playlist_id = ?")
            .bind(playlist_id)
            .fetch_all(pool)
            .await?;
    Ok(ids.into_iter().collect())
}

pub async fn all_playlists(pool: &Pool<Sqlite>) -> Result<Vec<PlaylistRecord>> {
    Ok(sqlx::query_as::<_, PlaylistRecord>("SELECT * FROM playlists")
        .fetch_all(pool)
        .await?)
}

pub async fn all_tracks(pool: &Pool<Sqlite>) -> Result<Vec<TrackRecord>> {
    Ok(sqlx::query_as::<_, TrackRecord>("SELECT * FROM tracks")
        .fetch_all(pool)
        .await?)
}

pub async fn all_artists(pool: &Pool<Sqlite>) -> Result<Vec<ArtistRecord>> {
    Ok(sqlx::query_as::<_, ArtistRecord>("SELECT * FROM artists")
        .fetch_all(pool)
        .await?)
}

/// Returns every artist credited on a member track of the playlist, with the
/// number of member tracks crediting them, ordered by that count descending.
/// Equal counts fall back to name order so the result is stable.
pub async fn playlist_artist_counts(
    pool: &Pool<Sqlite>,
    playlist_id: &str,
) -> Result<Vec<ArtistTally>> {
    Ok(sqlx::query_as::<_, ArtistTally>(
        "SELECT artists.name AS name, artists.genres AS genres, COUNT(tracks.id) AS num_tracks
         FROM tracks
         JOIN track_artists ON track_artists.track_id = tracks.id
         JOIN artists ON track_artists.artist_id = artists.id
         WHERE tracks.id IN (
             SELECT track_id FROM playlist_tracks WHERE playlist_id = ?
         )
         GROUP BY artists.id, artists.name, artists.genres
         ORDER BY num_tracks DESC, artists.name ASC",
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?)
}

/// Sums the durations of a playlist's member tracks, in seconds.
pub async fn playlist_duration_secs(pool: &Pool<Sqlite>, playlist_id: &str) -> Result<f64> {
    let secs = sqlx::query_scalar::<_, f64>(
        "SELECT COALESCE(SUM(duration_ms), 0) / 1000.0
         FROM tracks
         WHERE id IN (
             SELECT track_id FROM playlist_tracks WHERE playlist_id = ?
         )",
    )
    .bind(playlist_id)
    .fetch_one(pool)
    .await?;
    Ok(secs)
}
