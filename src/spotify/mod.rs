//! # Spotify Integration Module
//!
//! Thin client for the two Spotify endpoints SpotiFetch needs:
//!
//! ```text
//! cli::download
//!      ↓
//! Spotify Integration Layer
//!     ├── Authentication (client credentials grant)
//!     └── Playlist Resolution (paginated playlist tracks)
//!      ↓
//! HTTP Layer (reqwest, JSON)
//!      ↓
//! Spotify Web API
//! ```
//!
//! ## Authentication
//!
//! [`auth`] exchanges the application's client ID and secret for a bearer token
//! with `POST /api/token` and `grant_type=client_credentials`. The exchange is a
//! single blocking request made once per run; the token is never refreshed.
//!
//! ## Playlist Resolution
//!
//! [`playlist`] extracts the playlist ID from a share URL and walks
//! `GET /playlists/{id}/tracks` by following the `next` link of every page until
//! it is absent, a page fails, or the run is cancelled. Pages that fail are not
//! retried; the tracks gathered so far are returned.
//!
//! ## Error Types
//!
//! - [`auth::AuthError`] - transport failures, non-success status, malformed body
//! - [`playlist::PlaylistUrlError`] - share URLs without a playlist ID

pub mod auth;
pub mod playlist;
