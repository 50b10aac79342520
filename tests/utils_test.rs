use std::collections::HashSet;

use spotsync::types::Image;
use spotsync::utils::*;

fn id_set(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[test]
fn test_parse_playlist_id_from_bare_id() {
    assert_eq!(parse_playlist_id("37i9dQZF1DXcBWIGoYBM5M"), "37i9dQZF1DXcBWIGoYBM5M");
}

#[test]
fn test_parse_playlist_id_from_url() {
    assert_eq!(
        parse_playlist_id("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M"),
        "37i9dQZF1DXcBWIGoYBM5M"
    );
}

#[test]
fn test_parse_playlist_id_strips_query_string() {
    assert_eq!(
        parse_playlist_id("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc123"),
        "37i9dQZF1DXcBWIGoYBM5M"
    );
}

#[test]
fn test_parse_playlist_id_trailing_slash_and_whitespace() {
    assert_eq!(
        parse_playlist_id("  https://open.spotify.com/playlist/abc/ "),
        "abc"
    );
}

#[test]
fn test_membership_diff_disjoint_sets() {
    let stored = id_set(&["a", "b"]);
    let remote = id_set(&["c", "d"]);
    let (mut to_add, mut to_remove) = membership_diff(&stored, &remote);
    to_add.sort();
    to_remove.sort();

    assert_eq!(to_add, vec!["c", "d"]);
    assert_eq!(to_remove, vec!["a", "b"]);
}

#[test]
fn test_membership_diff_equal_sets() {
    let stored = id_set(&["a", "b", "c"]);
    let remote = id_set(&["a", "b", "c"]);
    let (to_add, to_remove) = membership_diff(&stored, &remote);

    assert!(to_add.is_empty());
    assert!(to_remove.is_empty());
}

#[test]
fn test_membership_diff_stored_subset_of_remote() {
    let stored = id_set(&["a"]);
    let remote = id_set(&["a", "b", "c"]);
    let (mut to_add, to_remove) = membership_diff(&stored, &remote);
    to_add.sort();

    assert_eq!(to_add, vec!["b", "c"]);
    assert!(to_remove.is_empty());
}

#[test]
fn test_membership_diff_stored_superset_of_remote() {
    let stored = id_set(&["a", "b", "c"]);
    let remote = id_set(&["b"]);
    let (to_add, mut to_remove) = membership_diff(&stored, &remote);
    to_remove.sort();

    assert!(to_add.is_empty());
    assert_eq!(to_remove, vec!["a", "c"]);
}

#[test]
fn test_membership_diff_overlapping_sets() {
    // The spec example: stored {A,B,C}, remote {B,C,D}.
    let stored = id_set(&["A", "B", "C"]);
    let remote = id_set(&["B", "C", "D"]);
    let (to_add, to_remove) = membership_diff(&stored, &remote);

    assert_eq!(to_add, vec!["D"]);
    assert_eq!(to_remove, vec!["A"]);

    // Applying the delta yields the remote set exactly.
    let mut after = stored.clone();
    for id in &to_remove {
        after.remove(id);
    }
    for id in &to_add {
        after.insert(id.clone());
    }
    assert_eq!(after, remote);
}

#[test]
fn test_tally_genres_weights_by_track_count() {
    let artists = vec![
        ("indie pop,rock".to_string(), 3),
        ("pop".to_string(), 2),
        ("rock".to_string(), 1),
    ];
    let top = tally_genres(&artists, 5);

    assert_eq!(top[0].name, "rock");
    assert_eq!(top[0].count, 4);
    assert_eq!(top[1].name, "indie pop");
    assert_eq!(top[1].count, 3);
    assert_eq!(top[2].name, "pop");
    assert_eq!(top[2].count, 2);
}

#[test]
fn test_tally_genres_truncates_to_n() {
    let artists = vec![("a,b,c,d,e,f,g".to_string(), 1)];
    let top = tally_genres(&artists, 5);
    assert_eq!(top.len(), 5);
}

#[test]
fn test_tally_genres_skips_empty_entries() {
    // An artist row with no genres produces an empty string after the
    // comma-join; it must not count as a genre named "".
    let artists = vec![("".to_string(), 4), ("pop".to_string(), 1)];
    let top = tally_genres(&artists, 5);

    assert_eq!(top.len(), 1);
    assert_eq!(top[0].name, "pop");
}

#[test]
fn test_tally_genres_ties_keep_first_seen_order() {
    let artists = vec![("shoegaze".to_string(), 2), ("dream pop".to_string(), 2)];
    let top = tally_genres(&artists, 5);

    assert_eq!(top[0].name, "shoegaze");
    assert_eq!(top[1].name, "dream pop");
}

#[test]
fn test_first_image_url() {
    let images = Some(vec![
        Image { url: "http://img/large".to_string() },
        Image { url: "http://img/small".to_string() },
    ]);
    assert_eq!(first_image_url(&images), Some("http://img/large".to_string()));

    assert_eq!(first_image_url(&Some(vec![])), None);
    assert_eq!(first_image_url(&None), None);
}
