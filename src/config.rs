//! Configuration management for SpotiFetch.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files, and holds the defaults used by a download run.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

/// Default Spotify accounts endpoint for the client credentials exchange.
pub const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Default Spotify Web API base URL.
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Number of playlist items requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Word appended to every search query after the track and artist names.
pub const DEFAULT_SEARCH_SUFFIX: &str = "audio";

/// File name of the completed-downloads record in the working directory.
pub const CACHE_FILE: &str = "downloaded_tracks.json";

/// Target audio bitrate passed to ffmpeg.
pub const DEFAULT_BITRATE: &str = "192k";

/// Target sample rate in Hz passed to ffmpeg.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

const OUTPUT_FOLDER: &str = "SpotiFetch";

/// Loads environment variables from `.env` files.
///
/// The working directory `.env` is read first, then the one in the
/// platform-specific local data directory under `spotifetch/.env`. Variables
/// that are already set are never overwritten, and neither file has to exist.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotifetch/.env`
/// - macOS: `~/Library/Application Support/spotifetch/.env`
/// - Windows: `%LOCALAPPDATA%/spotifetch/.env`
///
/// # Errors
///
/// Returns an error string if a `.env` file exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    match dotenv::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.to_string()),
    }

    let path = env_path();
    if async_fs::metadata(&path).await.is_ok() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotifetch/.env");
    path
}

/// Returns the Spotify API client ID.
///
/// Reads `SPOTIFY_CLIENT_ID`. A missing variable yields an empty string, which
/// makes the token exchange fail with a non-success status.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_CLIENT_ID").unwrap_or_default()
}

/// Returns the Spotify API client secret.
///
/// Reads `SPOTIFY_CLIENT_SECRET`. Same fallback behaviour as [`spotify_client_id`].
pub fn spotify_client_secret() -> String {
    env::var("SPOTIFY_CLIENT_SECRET").unwrap_or_default()
}

/// Returns the Spotify token exchange URL.
///
/// Reads `SPOTIFY_API_TOKEN_URL`, falling back to [`DEFAULT_SPOTIFY_API_TOKEN_URL`].
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| DEFAULT_SPOTIFY_API_TOKEN_URL.to_string())
}

/// Returns the Spotify Web API base URL.
///
/// Reads `SPOTIFY_API_URL`, falling back to [`DEFAULT_SPOTIFY_API_URL`].
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_SPOTIFY_API_URL.to_string())
}

/// Returns the default output directory for converted tracks.
///
/// Uses the platform download directory (`~/Downloads` on most systems) with a
/// `SpotiFetch` subfolder. Falls back to `./SpotiFetch` when no home directory
/// can be determined.
pub fn default_output_dir() -> PathBuf {
    let mut path = dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("."));
    path.push(OUTPUT_FOLDER);
    path
}
