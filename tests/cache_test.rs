use serde_json::{Value, json};
use spotifetch::management::{CacheError, CacheManager};
use spotifetch::types::TrackRef;
use tempfile::TempDir;

#[tokio::test]
async fn test_load_missing_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let cache = CacheManager::load(dir.path().join("downloaded_tracks.json"))
        .await
        .unwrap();

    assert_eq!(cache.count(), 0);
}

#[tokio::test]
async fn test_untouched_cache_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("downloaded_tracks.json");
    let original = json!({
        "Artist - Song": { "file": "Artist - Song.mp3" },
        "legacy": [1, 2, 3],
    });
    std::fs::write(&path, serde_json::to_string(&original).unwrap()).unwrap();

    let cache = CacheManager::load(path.clone()).await.unwrap();
    cache.persist().await.unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let reloaded: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(reloaded, original);
    assert!(written.contains("\n  \""), "expected two-space indentation");
}

#[tokio::test]
async fn test_empty_cache_is_written_as_object() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("cache.json");

    CacheManager::new(path.clone()).persist().await.unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
}

#[tokio::test]
async fn test_record_adds_completed_track() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cache.json");
    let track = TrackRef::new("Song", "Artist");

    let mut cache = CacheManager::new(path.clone());
    assert!(!cache.contains(&track));
    cache.record(&track, "Artist - Song.mp3");
    cache.persist().await.unwrap();

    let reloaded = CacheManager::load(path).await.unwrap();
    assert!(reloaded.contains(&track));
    assert_eq!(
        reloaded.entries()["Artist - Song"]["file"],
        json!("Artist - Song.mp3")
    );
    assert!(reloaded.entries()["Artist - Song"]["downloaded_at"].is_string());
}

#[tokio::test]
async fn test_malformed_cache_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cache.json");
    std::fs::write(&path, "[not an object").unwrap();

    let res = CacheManager::load(path).await;

    assert!(matches!(res, Err(CacheError::SerdeError(_))));
}
