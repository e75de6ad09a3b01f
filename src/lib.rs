//! SpotiFetch Library
//!
//! This library resolves a Spotify playlist into (track, artist) pairs, searches
//! a best-effort audio source for each pair with yt-dlp, transcodes the result to
//! MP3 with ffmpeg and keeps a small JSON record of completed downloads.
//!
//! # Modules
//!
//! - `cli` - The top-level playlist download run
//! - `config` - Configuration management and environment variables
//! - `download` - Per-track orchestration (acquire, transcode, report)
//! - `management` - Persistence of the completed-downloads cache
//! - `media` - External tool integrations (yt-dlp, ffmpeg)
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use spotifetch::{config, spotify, Res};
//!
//! fn token() -> Res<String> {
//!     let token = spotify::auth::obtain_token(
//!         &config::spotify_apitoken_url(),
//!         &config::spotify_client_id(),
//!         &config::spotify_client_secret(),
//!     )?;
//!     Ok(token)
//! }
//! ```

pub mod cli;
pub mod config;
pub mod download;
pub mod management;
pub mod media;
pub mod spotify;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object with `Send + Sync` bounds so it can
/// cross task boundaries in async contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Cache cleared");
/// info!("Resolved {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used for the per-track "Exists" and "Completed" progress lines.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1 right after printing. Only used for
/// fatal setup failures (missing tools, token exchange, malformed playlist URL).
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable conditions: per-track failures and page fetch errors.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
