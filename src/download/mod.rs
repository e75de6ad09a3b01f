//! # Download Orchestration
//!
//! Sequences the per-track work of a run: skip tracks whose MP3 already exists,
//! search and download the audio with an [`Extractor`], convert it with a
//! [`Transcoder`], drop the intermediate file, and report one line per track.
//!
//! Tracks are processed strictly in playlist order, one at a time. The
//! cancellation token is checked before every track; a track that is already
//! running is allowed to finish or fail.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;

use crate::{
    config,
    management::CacheManager,
    media::{Extractor, MediaError, Transcoder},
    success,
    types::TrackRef,
    warning,
};

/// Result of the acquisition step for one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquisition {
    /// The MP3 is already in the output directory; nothing was fetched.
    Exists(PathBuf),
    /// A source file was downloaded to this path.
    Downloaded(PathBuf),
    /// The run was cancelled before the track started.
    Cancelled,
}

#[derive(Debug)]
pub enum TrackOutcome {
    Exists(PathBuf),
    Completed(PathBuf),
    DownloadFailed(MediaError),
    ConversionFailed(MediaError),
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub completed: usize,
    pub existing: usize,
    pub failed: usize,
    pub not_attempted: usize,
}

pub struct Downloader {
    output: PathBuf,
    extractor: Arc<dyn Extractor>,
    transcoder: Arc<dyn Transcoder>,
    search_suffix: String,
}

impl Downloader {
    pub fn new(
        output: PathBuf,
        extractor: Arc<dyn Extractor>,
        transcoder: Arc<dyn Transcoder>,
    ) -> Self {
        Self {
            output,
            extractor,
            transcoder,
            search_suffix: config::DEFAULT_SEARCH_SUFFIX.to_string(),
        }
    }

    pub fn with_search_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.search_suffix = suffix.into();
        self
    }

    pub fn target_path(&self, track: &TrackRef) -> PathBuf {
        self.output.join(track.mp3_file_name())
    }

    /// Downloads the source audio for `track` unless its MP3 already exists.
    ///
    /// The extractor runs on the blocking pool so the interrupt listener is not
    /// starved while the download is in progress.
    pub async fn acquire(
        &self,
        track: &TrackRef,
        cancel: &CancellationToken,
    ) -> Result<Acquisition, MediaError> {
        if cancel.is_cancelled() {
            return Ok(Acquisition::Cancelled);
        }

        let target = self.target_path(track);
        if async_fs::metadata(&target).await.is_ok() {
            return Ok(Acquisition::Exists(target));
        }

        let extractor = Arc::clone(&self.extractor);
        let query = track.search_query(&self.search_suffix);
        let template = self.output.join(track.download_template());

        let source = tokio::task::spawn_blocking(move || extractor.download(&query, &template))
            .await
            .map_err(|e| MediaError::ProcessFailed(format!("download worker failed: {}", e)))??;

        Ok(Acquisition::Downloaded(source))
    }

    /// Converts `src` into `dst` and removes `src` afterwards.
    ///
    /// Removal of the intermediate file is best effort. On failure a partially
    /// written `dst` is removed as well so a retry is not mistaken for an
    /// existing track.
    pub async fn convert(&self, src: &Path, dst: &Path) -> Result<(), MediaError> {
        let transcoder = Arc::clone(&self.transcoder);
        let (from, to) = (src.to_path_buf(), dst.to_path_buf());

        let result = tokio::task::spawn_blocking(move || transcoder.convert(&from, &to))
            .await
            .map_err(|e| MediaError::ProcessFailed(format!("conversion worker failed: {}", e)))
            .and_then(|res| res);

        let _ = async_fs::remove_file(src).await;
        if result.is_err() {
            let _ = async_fs::remove_file(dst).await;
        }

        result
    }

    /// Runs acquisition and conversion for one track and prints its progress line.
    pub async fn process_track(
        &self,
        index: usize,
        total: usize,
        track: &TrackRef,
        cancel: &CancellationToken,
    ) -> TrackOutcome {
        let pb = spinner(format!("[{}/{}] Downloading: {}", index, total, track));

        let outcome = match self.acquire(track, cancel).await {
            Ok(Acquisition::Cancelled) => TrackOutcome::Cancelled,
            Ok(Acquisition::Exists(target)) => TrackOutcome::Exists(target),
            Ok(Acquisition::Downloaded(source)) => {
                let target = self.target_path(track);
                pb.set_message(format!("[{}/{}] Converting: {}", index, total, track));
                match self.convert(&source, &target).await {
                    Ok(()) => TrackOutcome::Completed(target),
                    Err(e) => TrackOutcome::ConversionFailed(e),
                }
            }
            Err(e) => TrackOutcome::DownloadFailed(e),
        };

        pb.finish_and_clear();
        report(index, total, &outcome);
        outcome
    }

    /// Processes `tracks` in order until done or cancelled.
    ///
    /// Creates the output directory first. Completed tracks are recorded in
    /// `cache`; the caller decides when to persist it.
    pub async fn run(
        &self,
        tracks: &[TrackRef],
        cache: &mut CacheManager,
        cancel: &CancellationToken,
    ) -> std::io::Result<RunSummary> {
        async_fs::create_dir_all(&self.output).await?;

        let total = tracks.len();
        let mut summary = RunSummary::default();

        for (i, track) in tracks.iter().enumerate() {
            if cancel.is_cancelled() {
                summary.not_attempted = total - i;
                break;
            }

            match self.process_track(i + 1, total, track, cancel).await {
                TrackOutcome::Exists(_) => summary.existing += 1,
                TrackOutcome::Completed(target) => {
                    let file_name = file_name(&target);
                    cache.record(track, &file_name);
                    summary.completed += 1;
                }
                TrackOutcome::DownloadFailed(_) | TrackOutcome::ConversionFailed(_) => {
                    summary.failed += 1
                }
                TrackOutcome::Cancelled => {
                    summary.not_attempted = total - i;
                    break;
                }
            }
        }

        Ok(summary)
    }
}

/// Text of the single console line printed for a finished track.
///
/// `None` for a track that was never started.
pub fn progress_line(index: usize, total: usize, outcome: &TrackOutcome) -> Option<String> {
    let line = match outcome {
        TrackOutcome::Exists(target) => format!("[{}/{}] Exists: {}", index, total, file_name(target)),
        TrackOutcome::Completed(target) => {
            format!("[{}/{}] Completed: {}", index, total, file_name(target))
        }
        TrackOutcome::DownloadFailed(MediaError::NoResult) => {
            format!("[{}/{}] Download returned no info", index, total)
        }
        TrackOutcome::DownloadFailed(e) => format!("[{}/{}] Download failed: {}", index, total, e),
        TrackOutcome::ConversionFailed(e) => {
            format!("[{}/{}] Conversion failed: {}", index, total, e)
        }
        TrackOutcome::Cancelled => return None,
    };
    Some(line)
}

fn report(index: usize, total: usize, outcome: &TrackOutcome) {
    let Some(line) = progress_line(index, total, outcome) else {
        return;
    };

    match outcome {
        TrackOutcome::Exists(_) | TrackOutcome::Completed(_) => success!("{}", line),
        _ => warning!("{}", line),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
