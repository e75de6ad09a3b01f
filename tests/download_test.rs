use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use spotifetch::download::{Acquisition, Downloader, RunSummary, TrackOutcome};
use spotifetch::management::CacheManager;
use spotifetch::media::{Extractor, MediaError, Transcoder};
use spotifetch::types::TrackRef;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

// Writes a fake ".webm" source next to the template and remembers the queries.
#[derive(Default)]
struct FakeExtractor {
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
    fail_on: Option<String>,
}

impl Extractor for FakeExtractor {
    fn download(&self, query: &str, template: &Path) -> Result<PathBuf, MediaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());

        if self.fail_on.as_deref() == Some(query) {
            return Err(MediaError::NoResult);
        }

        let source = PathBuf::from(template.to_string_lossy().replace("%(ext)s", "webm"));
        std::fs::write(&source, b"source")?;
        Ok(source)
    }
}

#[derive(Default)]
struct FakeTranscoder {
    calls: AtomicUsize,
    fail: bool,
}

impl Transcoder for FakeTranscoder {
    fn convert(&self, src: &Path, dst: &Path) -> Result<(), MediaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(src.exists(), "source must exist before conversion");

        if self.fail {
            std::fs::write(dst, b"partial")?;
            return Err(MediaError::ProcessFailed("ffmpeg exited with 1".to_string()));
        }

        std::fs::write(dst, b"mp3")?;
        Ok(())
    }
}

fn downloader(
    dir: &TempDir,
    extractor: &Arc<FakeExtractor>,
    transcoder: &Arc<FakeTranscoder>,
) -> Downloader {
    Downloader::new(
        dir.path().to_path_buf(),
        extractor.clone(),
        transcoder.clone(),
    )
}

#[tokio::test]
async fn test_existing_file_skips_download() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("Artist - Song.mp3"), b"mp3").unwrap();

    let extractor = Arc::new(FakeExtractor::default());
    let transcoder = Arc::new(FakeTranscoder::default());
    let dl = downloader(&dir, &extractor, &transcoder);

    let outcome = dl
        .process_track(1, 1, &TrackRef::new("Song", "Artist"), &CancellationToken::new())
        .await;

    assert!(matches!(outcome, TrackOutcome::Exists(ref p) if p.ends_with("Artist - Song.mp3")));
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
    assert_eq!(transcoder.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_acquire_is_noop_when_cancelled() {
    let dir = TempDir::new().unwrap();
    let extractor = Arc::new(FakeExtractor::default());
    let transcoder = Arc::new(FakeTranscoder::default());
    let dl = downloader(&dir, &extractor, &transcoder);

    let cancel = CancellationToken::new();
    cancel.cancel();

    let res = dl.acquire(&TrackRef::new("Song", "Artist"), &cancel).await;

    assert!(matches!(res, Ok(Acquisition::Cancelled)));
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_completed_track_replaces_source_with_mp3() {
    let dir = TempDir::new().unwrap();
    let extractor = Arc::new(FakeExtractor::default());
    let transcoder = Arc::new(FakeTranscoder::default());
    let dl = downloader(&dir, &extractor, &transcoder);

    let outcome = dl
        .process_track(
            1,
            1,
            &TrackRef::new("AC/DC", "Some/Band"),
            &CancellationToken::new(),
        )
        .await;

    assert!(matches!(outcome, TrackOutcome::Completed(_)));
    assert!(dir.path().join("Some_Band - AC_DC.mp3").exists());
    assert!(!dir.path().join("Some_Band - AC_DC.webm").exists());
    assert_eq!(
        *extractor.queries.lock().unwrap(),
        vec!["AC/DC Some/Band audio".to_string()]
    );
}

#[tokio::test]
async fn test_conversion_failure_leaves_no_target_and_continues() {
    let dir = TempDir::new().unwrap();
    let extractor = Arc::new(FakeExtractor::default());
    let transcoder = Arc::new(FakeTranscoder {
        fail: true,
        ..Default::default()
    });
    let dl = downloader(&dir, &extractor, &transcoder);
    let mut cache = CacheManager::new(dir.path().join("cache.json"));

    let tracks = vec![TrackRef::new("First", "Artist"), TrackRef::new("Second", "Artist")];
    let summary = dl
        .run(&tracks, &mut cache, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        summary,
        RunSummary {
            completed: 0,
            existing: 0,
            failed: 2,
            not_attempted: 0,
        }
    );
    assert_eq!(transcoder.calls.load(Ordering::SeqCst), 2);
    assert!(!dir.path().join("Artist - First.mp3").exists());
    assert!(!dir.path().join("Artist - First.webm").exists());
    assert!(!dir.path().join("Artist - Second.mp3").exists());
    assert_eq!(cache.count(), 0);
}

#[tokio::test]
async fn test_download_failure_does_not_stop_run() {
    let dir = TempDir::new().unwrap();
    let extractor = Arc::new(FakeExtractor {
        fail_on: Some("Missing Artist audio".to_string()),
        ..Default::default()
    });
    let transcoder = Arc::new(FakeTranscoder::default());
    let dl = downloader(&dir, &extractor, &transcoder);
    let mut cache = CacheManager::new(dir.path().join("cache.json"));

    let tracks = vec![TrackRef::new("Missing", "Artist"), TrackRef::new("Found", "Artist")];
    let summary = dl
        .run(&tracks, &mut cache, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.completed, 1);
    assert_eq!(transcoder.calls.load(Ordering::SeqCst), 1);
    assert!(dir.path().join("Artist - Found.mp3").exists());
    assert!(cache.contains(&TrackRef::new("Found", "Artist")));
    assert!(!cache.contains(&TrackRef::new("Missing", "Artist")));
}

#[tokio::test]
async fn test_cancelled_run_attempts_no_tracks() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out");
    let extractor = Arc::new(FakeExtractor::default());
    let transcoder = Arc::new(FakeTranscoder::default());
    let dl = Downloader::new(output.clone(), extractor.clone(), transcoder.clone());
    let mut cache = CacheManager::new(dir.path().join("cache.json"));

    let cancel = CancellationToken::new();
    cancel.cancel();

    let tracks = vec![TrackRef::new("One", "A"), TrackRef::new("Two", "B")];
    let summary = dl.run(&tracks, &mut cache, &cancel).await.unwrap();

    assert_eq!(summary.not_attempted, 2);
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
    assert!(output.is_dir(), "output directory is created before iterating");
}

#[tokio::test]
async fn test_run_mixes_existing_and_new_tracks() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("Artist - Old.mp3"), b"mp3").unwrap();

    let extractor = Arc::new(FakeExtractor::default());
    let transcoder = Arc::new(FakeTranscoder::default());
    let dl = downloader(&dir, &extractor, &transcoder).with_search_suffix("official");
    let mut cache = CacheManager::new(dir.path().join("cache.json"));

    let tracks = vec![TrackRef::new("Old", "Artist"), TrackRef::new("New", "Artist")];
    let summary = dl
        .run(&tracks, &mut cache, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(summary.existing, 1);
    assert_eq!(summary.completed, 1);
    assert_eq!(
        *extractor.queries.lock().unwrap(),
        vec!["New Artist official".to_string()]
    );
}
