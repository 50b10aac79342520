use spotsync::db::{
    self, Store,
    models::{ArtistRecord, PlaylistRecord, TrackRecord},
};

async fn test_store() -> Store {
    let store = Store::in_memory().await.expect("in-memory store");
    store.init_schema().await.expect("schema");
    store
}

fn playlist(id: &str, name: &str, followers: i64) -> PlaylistRecord {
    PlaylistRecord {
        id: id.to_string(),
        name: name.to_string(),
        description: Some("desc".to_string()),
        thumbnail: None,
        followers_count: Some(followers),
    }
}

fn track(id: &str, name: &str, duration_ms: i64) -> TrackRecord {
    TrackRecord {
        id: id.to_string(),
        name: name.to_string(),
        thumbnail: None,
        preview_url: None,
        popularity: Some(50),
        danceability: Some(0.5),
        energy: Some(0.6),
        loudness: Some(-7.0),
        speechiness: Some(0.05),
        acousticness: Some(0.2),
        instrumentalness: Some(0.0),
        liveness: Some(0.1),
        valence: Some(0.4),
        tempo: Some(120.0),
        mode: Some(1),
        duration_ms: Some(duration_ms),
    }
}

fn artist(id: &str, name: &str, genres: &str) -> ArtistRecord {
    ArtistRecord {
        id: id.to_string(),
        name: name.to_string(),
        thumbnail: None,
        popularity: Some(60),
        genres: Some(genres.to_string()),
    }
}

#[tokio::test]
async fn playlist_upsert_overwrites_mutable_fields() {
    let store = test_store().await;

    let mut tx = store.begin().await.unwrap();
    db::upsert_playlist(&mut tx, &playlist("p1", "Before", 10)).await.unwrap();
    db::upsert_playlist(&mut tx, &playlist("p1", "After", 99)).await.unwrap();
    tx.commit().await.unwrap();

    let playlists = db::all_playlists(store.pool()).await.unwrap();
    assert_eq!(playlists.len(), 1);
    assert_eq!(playlists[0].name, "After");
    assert_eq!(playlists[0].followers_count, Some(99));
}

#[tokio::test]
async fn tracks_are_immutable_once_inserted() {
    let store = test_store().await;

    let mut tx = store.begin().await.unwrap();
    db::insert_tracks(&mut tx, &[track("t1", "Original", 1000)]).await.unwrap();
    // Second insert with changed attributes must be a silent no-op.
    db::insert_tracks(&mut tx, &[track("t1", "Changed", 9999)]).await.unwrap();
    tx.commit().await.unwrap();

    let tracks = db::all_tracks(store.pool()).await.unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].name, "Original");
    assert_eq!(tracks[0].duration_ms, Some(1000));
}

#[tokio::test]
async fn artists_are_immutable_once_inserted() {
    let store = test_store().await;

    let mut tx = store.begin().await.unwrap();
    db::insert_artists(&mut tx, &[artist("a1", "Original", "pop")]).await.unwrap();
    db::insert_artists(&mut tx, &[artist("a1", "Changed", "metal")]).await.unwrap();
    tx.commit().await.unwrap();

    let artists = db::all_artists(store.pool()).await.unwrap();
    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0].name, "Original");
    assert_eq!(artists[0].genres.as_deref(), Some("pop"));
}

#[tokio::test]
async fn null_feature_set_is_stored_as_all_absent() {
    let store = test_store().await;

    let nulls = TrackRecord {
        id: "t1".to_string(),
        name: "No analysis".to_string(),
        thumbnail: None,
        preview_url: None,
        popularity: None,
        danceability: None,
        energy: None,
        loudness: None,
        speechiness: None,
        acousticness: None,
        instrumentalness: None,
        liveness: None,
        valence: None,
        tempo: None,
        mode: None,
        duration_ms: None,
    };

    let mut tx = store.begin().await.unwrap();
    db::insert_tracks(&mut tx, &[nulls]).await.unwrap();
    tx.commit().await.unwrap();

    let tracks = db::all_tracks(store.pool()).await.unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].danceability, None);
    assert_eq!(tracks[0].tempo, None);
    assert_eq!(tracks[0].mode, None);
}

#[tokio::test]
async fn duplicate_membership_rows_are_ignored() {
    let store = test_store().await;

    let mut tx = store.begin().await.unwrap();
    db::upsert_playlist(&mut tx, &playlist("p1", "P", 0)).await.unwrap();
    db::insert_tracks(&mut tx, &[track("t1", "T", 1000)]).await.unwrap();
    db::insert_playlist_tracks(&mut tx, "p1", &["t1".to_string()]).await.unwrap();
    db::insert_playlist_tracks(&mut tx, "p1", &["t1".to_string()]).await.unwrap();
    tx.commit().await.unwrap();

    let ids = db::playlist_track_ids(store.pool(), "p1").await.unwrap();
    assert_eq!(ids.len(), 1);
}

#[tokio::test]
async fn remove_playlist_tracks_only_touches_membership() {
    let store = test_store().await;

    let mut tx = store.begin().await.unwrap();
    db::upsert_playlist(&mut tx, &playlist("p1", "P", 0)).await.unwrap();
    db::insert_tracks(
        &mut tx,
        &[track("t1", "A", 1000), track("t2", "B", 1000), track("t3", "C", 1000)],
    )
    .await
    .unwrap();
    db::insert_playlist_tracks(
        &mut tx,
        "p1",
        &["t1".to_string(), "t2".to_string(), "t3".to_string()],
    )
    .await
    .unwrap();
    db::remove_playlist_tracks(&mut tx, "p1", &["t1".to_string(), "t3".to_string()])
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let ids = db::playlist_track_ids(store.pool(), "p1").await.unwrap();
    assert_eq!(ids.len(), 1);
    assert!(ids.contains("t2"));

    // Orphaned tracks stay in the master table.
    let tracks = db::all_tracks(store.pool()).await.unwrap();
    assert_eq!(tracks.len(), 3);
}

#[tokio::test]
async fn existing_id_lookups_return_only_known_ids() {
    let store = test_store().await;

    let mut tx = store.begin().await.unwrap();
    db::insert_tracks(&mut tx, &[track("t1", "A", 1000)]).await.unwrap();
    tx.commit().await.unwrap();

    let known = db::existing_track_ids(store.pool(), &["t1".to_string(), "t2".to_string()])
        .await
        .unwrap();
    assert!(known.contains("t1"));
    assert!(!known.contains("t2"));

    let empty = db::existing_track_ids(store.pool(), &[]).await.unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn artist_counts_order_by_member_track_count() {
    let store = test_store().await;

    let mut tx = store.begin().await.unwrap();
    db::upsert_playlist(&mut tx, &playlist("p1", "P", 0)).await.unwrap();
    db::insert_artists(
        &mut tx,
        &[artist("x", "Xavier", "indie pop,rock"), artist("y", "Yolanda", "pop")],
    )
    .await
    .unwrap();
    let tracks: Vec<TrackRecord> = (1..=5).map(|i| track(&format!("t{i}"), "T", 1000)).collect();
    db::insert_tracks(&mut tx, &tracks).await.unwrap();
    // Three tracks by Xavier, two by Yolanda.
    db::insert_track_artists(
        &mut tx,
        &[
            ("t1".to_string(), "x".to_string()),
            ("t2".to_string(), "x".to_string()),
            ("t3".to_string(), "x".to_string()),
            ("t4".to_string(), "y".to_string()),
            ("t5".to_string(), "y".to_string()),
        ],
    )
    .await
    .unwrap();
    let member_ids: Vec<String> = (1..=5).map(|i| format!("t{i}")).collect();
    db::insert_playlist_tracks(&mut tx, "p1", &member_ids).await.unwrap();
    tx.commit().await.unwrap();

    let tallies = db::playlist_artist_counts(store.pool(), "p1").await.unwrap();
    assert_eq!(tallies.len(), 2);
    assert_eq!(tallies[0].name, "Xavier");
    assert_eq!(tallies[0].num_tracks, 3);
    assert_eq!(tallies[1].name, "Yolanda");
    assert_eq!(tallies[1].num_tracks, 2);
}

#[tokio::test]
async fn duration_sums_member_tracks_in_seconds() {
    let store = test_store().await;

    let mut tx = store.begin().await.unwrap();
    db::upsert_playlist(&mut tx, &playlist("p1", "P", 0)).await.unwrap();
    db::insert_tracks(
        &mut tx,
        &[track("t1", "A", 200_000), track("t2", "B", 180_500), track("t3", "C", 60_000)],
    )
    .await
    .unwrap();
    // Only t1 and t2 are members; t3 belongs to no playlist.
    db::insert_playlist_tracks(&mut tx, "p1", &["t1".to_string(), "t2".to_string()])
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let secs = db::playlist_duration_secs(store.pool(), "p1").await.unwrap();
    assert!((secs - 380.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn duration_of_empty_playlist_is_zero() {
    let store = test_store().await;
    let secs = db::playlist_duration_secs(store.pool(), "nope").await.unwrap();
    assert_eq!(secs, 0.0);
}

#[tokio::test]
async fn reset_drops_all_rows() {
    let store = test_store().await;

    let mut tx = store.begin().await.unwrap();
    db::upsert_playlist(&mut tx, &playlist("p1", "P", 0)).await.unwrap();
    db::insert_tracks(&mut tx, &[track("t1", "A", 1000)]).await.unwrap();
    tx.commit().await.unwrap();

    store.reset().await.unwrap();

    assert!(db::all_playlists(store.pool()).await.unwrap().is_empty());
    assert!(db::all_tracks(store.pool()).await.unwrap().is_empty());
}
