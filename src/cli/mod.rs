//! # CLI Module
//!
//! The command-line layer of SpotiFetch. A run is a single pipeline:
//!
//! ```text
//! locate ffmpeg / yt-dlp
//!     ↓
//! parse playlist URL → load cache
//!     ↓
//! client credentials token (once)
//!     ↓
//! paginate playlist tracks (once)
//!     ↓
//! for each track: exists? → search + download → convert → delete source
//!     ↓
//! save cache → "All done!"
//! ```
//!
//! ## Error Handling
//!
//! Setup failures (missing tool, malformed URL, unreadable cache, token exchange)
//! print one line with `error!` and exit with status 1. Page fetch errors end
//! pagination early and per-track failures are reported with `warning!`; neither
//! stops the run.
//!
//! ## Interrupts
//!
//! Ctrl+C cancels the shared token. The current track is allowed to finish, no
//! further page or track is started, and the run ends normally with the cache
//! written back.

mod download;

pub use download::DownloadOptions;
pub use download::download;
