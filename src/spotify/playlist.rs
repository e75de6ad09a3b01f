use std::fmt;

use reqwest::{Client, StatusCode};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{
    types::{PlaylistTracksPage, TrackRef},
    warning,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistUrlError {
    MissingPlaylistSegment,
    MissingId,
}

impl fmt::Display for PlaylistUrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaylistUrlError::MissingPlaylistSegment => {
                write!(f, "Invalid URL: Please provide a playlist URL")
            }
            PlaylistUrlError::MissingId => {
                write!(f, "Invalid URL: No playlist ID after the playlist segment")
            }
        }
    }
}

impl std::error::Error for PlaylistUrlError {}

/// Extracts the playlist ID from a Spotify share link.
///
/// The path must contain a `playlist` segment; the segment following it, with
/// any query string removed, is the ID. `spotify:playlist:<id>` URIs and links
/// without a scheme are accepted as well.
///
/// # Example
///
/// ```
/// let id = parse_playlist_id("https://open.spotify.com/playlist/ABC123?si=xyz")?;
/// assert_eq!(id, "ABC123");
/// ```
pub fn parse_playlist_id(input: &str) -> Result<String, PlaylistUrlError> {
    let segments = path_segments(input.trim());

    let pos = segments
        .iter()
        .position(|s| s == "playlist")
        .ok_or(PlaylistUrlError::MissingPlaylistSegment)?;

    let id = segments
        .get(pos + 1)
        .and_then(|s| s.split('?').next())
        .unwrap_or_default();

    if id.is_empty() {
        return Err(PlaylistUrlError::MissingId);
    }

    Ok(id.to_string())
}

fn path_segments(input: &str) -> Vec<String> {
    match Url::parse(input) {
        Ok(url) if url.scheme() == "spotify" => url.path().split(':').map(String::from).collect(),
        Ok(url) => url
            .path_segments()
            .map(|segments| segments.map(String::from).collect())
            .unwrap_or_default(),
        Err(_) => input
            .split('?')
            .next()
            .unwrap_or_default()
            .split('/')
            .map(String::from)
            .collect(),
    }
}

/// Resolves every track of a playlist into (name, first artist) pairs.
///
/// Requests `{api_url}/playlists/{playlist_id}/tracks?limit={page_size}` and then
/// follows the `next` link of each page until it is absent. Items without a
/// track, a track name, or an artist are skipped.
///
/// # Arguments
///
/// * `client` - Shared HTTP session for the run
/// * `api_url` - Spotify Web API base URL
/// * `playlist_id` - ID extracted with [`parse_playlist_id`]
/// * `token` - Bearer token from the client credentials exchange
/// * `page_size` - `limit` query parameter of the first request
/// * `cancel` - Checked before every page request
///
/// # Partial Results
///
/// A non-200 status, a transport error, or an undecodable page is reported with
/// `warning!` and ends the pagination. Whatever was collected up to that point is
/// returned; the function itself never fails.
pub async fn fetch_tracks(
    client: &Client,
    api_url: &str,
    playlist_id: &str,
    token: &str,
    page_size: u32,
    cancel: &CancellationToken,
) -> Vec<TrackRef> {
    let mut tracks: Vec<TrackRef> = Vec::new();
    let mut next: Option<String> = Some(format!(
        "{uri}/playlists/{id}/tracks?limit={limit}",
        uri = api_url.trim_end_matches('/'),
        id = playlist_id,
        limit = page_size
    ));

    while let Some(page_url) = next.take() {
        if cancel.is_cancelled() {
            break;
        }

        let response = match client.get(&page_url).bearer_auth(token).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warning!("Spotify API request failed: {}", e);
                break;
            }
        };

        if response.status() != StatusCode::OK {
            warning!("Spotify API error: {}", response.status().as_u16());
            break;
        }

        let page = match response.json::<PlaylistTracksPage>().await {
            Ok(page) => page,
            Err(e) => {
                warning!("Failed to decode playlist page: {}", e);
                break;
            }
        };

        tracks.extend(page.items.iter().filter_map(|item| item.track_ref()));
        next = page.next;
    }

    tracks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_share_link() {
        assert_eq!(
            parse_playlist_id("https://open.example/playlist/ABC123?si=xyz"),
            Ok("ABC123".to_string())
        );
    }

    #[test]
    fn parses_link_without_scheme() {
        assert_eq!(
            parse_playlist_id("open.spotify.com/playlist/XYZ?si=1"),
            Ok("XYZ".to_string())
        );
    }

    #[test]
    fn parses_spotify_uri() {
        assert_eq!(
            parse_playlist_id("spotify:playlist:37i9dQZF1DXcBWIGoYBM5M"),
            Ok("37i9dQZF1DXcBWIGoYBM5M".to_string())
        );
    }

    #[test]
    fn rejects_non_playlist_links() {
        assert_eq!(
            parse_playlist_id("https://open.spotify.com/album/ABC123"),
            Err(PlaylistUrlError::MissingPlaylistSegment)
        );
        assert_eq!(
            parse_playlist_id("https://open.spotify.com/playlist/"),
            Err(PlaylistUrlError::MissingId)
        );
        assert_eq!(
            parse_playlist_id("https://open.spotify.com/playlist"),
            Err(PlaylistUrlError::MissingId)
        );
    }
}
