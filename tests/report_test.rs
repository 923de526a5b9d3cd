use std::fs;

use tempfile::tempdir;
use tunesweep::report::{read_song_list, write_song_list};

#[tokio::test]
async fn writes_one_line_per_song() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("all-processed_songs.txt");
    let songs = vec!["Y X".to_string(), "Bohemian Rhapsody Queen".to_string()];

    write_song_list(&path, &songs).await.unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Y X\nBohemian Rhapsody Queen\n"
    );
    assert_eq!(read_song_list(&path).await.unwrap(), songs);
}

#[tokio::test]
async fn empty_list_writes_empty_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notfound.txt");

    write_song_list(&path, &[]).await.unwrap();

    assert!(path.is_file());
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
    assert!(read_song_list(&path).await.unwrap().is_empty());
}

#[tokio::test]
async fn existing_file_is_overwritten() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notfound.txt");
    fs::write(&path, "old one\nold two\nold three\n").unwrap();

    write_song_list(&path, &["new".to_string()]).await.unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
}

#[tokio::test]
async fn duplicates_and_unicode_survive() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("list.txt");
    let songs = vec![
        "Y X".to_string(),
        "Y X".to_string(),
        "Ça plane pour moi Plastic Bertrand".to_string(),
    ];

    write_song_list(&path, &songs).await.unwrap();

    assert_eq!(read_song_list(&path).await.unwrap(), songs);
}

#[tokio::test]
async fn missing_parent_directory_is_created() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reports/2024/notfound.txt");

    write_song_list(&path, &["A a".to_string()]).await.unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "A a\n");
}

#[tokio::test]
async fn reading_skips_blank_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hand-edited.txt");
    fs::write(&path, "A a\n\nB b\n").unwrap();

    assert_eq!(
        read_song_list(&path).await.unwrap(),
        vec!["A a".to_string(), "B b".to_string()]
    );
}

#[tokio::test]
async fn reading_a_missing_list_fails() {
    let dir = tempdir().unwrap();
    assert!(read_song_list(&dir.path().join("nope.txt")).await.is_err());
}

#[tokio::test]
async fn trailing_carriage_return_survives_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("list.txt");
    let songs = vec!["Y X\r".to_string(), "A a".to_string()];

    write_song_list(&path, &songs).await.unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "Y X\r\nA a\n");
    assert_eq!(read_song_list(&path).await.unwrap(), songs);
}
