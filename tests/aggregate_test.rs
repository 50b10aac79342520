use spotsync::aggregate::{top_artists, top_genres};
use spotsync::db::models::ArtistTally;

fn tally(name: &str, genres: Option<&str>, num_tracks: i64) -> ArtistTally {
    ArtistTally {
        name: name.to_string(),
        genres: genres.map(|g| g.to_string()),
        num_tracks,
    }
}

#[test]
fn top_artists_takes_the_ordered_prefix() {
    let tallies = vec![
        tally("Xavier", Some("rock"), 3),
        tally("Yolanda", Some("pop"), 2),
        tally("Zed", None, 1),
    ];

    let top = top_artists(&tallies, 2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].name, "Xavier");
    assert_eq!(top[0].count, 3);
    assert_eq!(top[1].name, "Yolanda");
    assert_eq!(top[1].count, 2);
}

#[test]
fn top_artists_handles_fewer_than_n() {
    let tallies = vec![tally("Solo", None, 1)];
    assert_eq!(top_artists(&tallies, 5).len(), 1);
}

#[test]
fn top_genres_weights_each_genre_by_track_count() {
    let tallies = vec![
        tally("Xavier", Some("indie pop,rock"), 3),
        tally("Yolanda", Some("pop"), 2),
        tally("Zed", Some("rock"), 1),
    ];

    let top = top_genres(&tallies, 5);
    assert_eq!(top[0].name, "rock");
    assert_eq!(top[0].count, 4);
    assert_eq!(top[1].name, "indie pop");
    assert_eq!(top[1].count, 3);
    assert_eq!(top[2].name, "pop");
    assert_eq!(top[2].count, 2);
}

#[test]
fn top_genres_ignores_artists_without_genres() {
    let tallies = vec![tally("Zed", None, 5), tally("Yolanda", Some("pop"), 1)];
    let top = top_genres(&tallies, 5);

    assert_eq!(top.len(), 1);
    assert_eq!(top[0].name, "pop");
}
