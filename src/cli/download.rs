use std::{path::PathBuf, sync::Arc};

use reqwest::Client;
use tokio_util::sync::CancellationToken;

use crate::{
    config,
    download::{Downloader, RunSummary},
    error, info,
    management::CacheManager,
    media::{
        ffmpeg::{Ffmpeg, TranscodeOptions},
        ytdlp::YtDlp,
    },
    spotify, warning, Res,
};

#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub url: String,
    pub output: PathBuf,
    pub clear_cache: bool,
    pub cache_file: PathBuf,
    pub page_size: u32,
    pub search_suffix: String,
    pub transcode: TranscodeOptions,
}

/// Downloads every track of a playlist into the output directory.
///
/// Missing tools, a malformed playlist URL, an unreadable cache and a failed
/// token exchange terminate the process with exit code 1. Everything after the
/// token exchange is per-track and never aborts the run. On completion, and on
/// interrupt, the cache is written back and "All done!" is printed.
pub async fn download(opts: DownloadOptions, cancel: CancellationToken) {
    let ffmpeg = match Ffmpeg::locate(opts.transcode.clone()) {
        Ok(ffmpeg) => ffmpeg,
        Err(e) => error!("{}", e),
    };
    let ytdlp = match YtDlp::locate() {
        Ok(ytdlp) => ytdlp,
        Err(e) => error!("{}", e),
    };

    let playlist_id = match spotify::playlist::parse_playlist_id(&opts.url) {
        Ok(id) => id,
        Err(e) => error!("{}", e),
    };

    let mut cache = if opts.clear_cache {
        info!("Cache cleared");
        CacheManager::new(opts.cache_file.clone())
    } else {
        match CacheManager::load(opts.cache_file.clone()).await {
            Ok(cache) => cache,
            Err(e) => error!(
                "Failed to load cache {}: {}",
                opts.cache_file.display(),
                e
            ),
        }
    };

    if !cancel.is_cancelled() {
        let token = match fetch_token().await {
            Ok(token) => token,
            Err(e) => error!("{}", e),
        };

        if !cancel.is_cancelled() {
            let client = Client::new();
            let tracks = spotify::playlist::fetch_tracks(
                &client,
                &config::spotify_apiurl(),
                &playlist_id,
                &token,
                opts.page_size,
                &cancel,
            )
            .await;

            let downloader = Downloader::new(opts.output.clone(), Arc::new(ytdlp), Arc::new(ffmpeg))
                .with_search_suffix(opts.search_suffix.clone());

            match downloader.run(&tracks, &mut cache, &cancel).await {
                Ok(summary) => print_summary(&summary),
                Err(e) => error!(
                    "Cannot create output directory {}: {}",
                    opts.output.display(),
                    e
                ),
            }

            drop(client);
        }
    }

    if let Err(e) = cache.persist().await {
        warning!("Failed to save cache {}: {}", cache.path().display(), e);
    }

    info!("All done!");
}

async fn fetch_token() -> Res<String> {
    let token_url = config::spotify_apitoken_url();
    let client_id = config::spotify_client_id();
    let client_secret = config::spotify_client_secret();

    let token = tokio::task::spawn_blocking(move || {
        spotify::auth::obtain_token(&token_url, &client_id, &client_secret)
    })
    .await??;

    Ok(token)
}

fn print_summary(summary: &RunSummary) {
    info!(
        "{} completed, {} existing, {} failed, {} not attempted",
        summary.completed, summary.existing, summary.failed, summary.not_attempted
    );
}
