use std::fmt;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// One page of `GET /playlists/{id}/tracks`.
///
/// Every field is optional on the wire; a page without `items` is treated as
/// empty and a missing `next` ends the pagination.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistTracksPage {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistTrack {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackArtist {
    #[serde(default)]
    pub name: Option<String>,
}

impl PlaylistItem {
    /// Extracts the track name and its first artist, if both are present.
    pub fn track_ref(&self) -> Option<TrackRef> {
        let track = self.track.as_ref()?;
        let name = track.name.clone()?;
        let artist = track.artists.first()?.name.clone()?;
        Some(TrackRef { name, artist })
    }
}

/// A resolved playlist entry: the track name and its primary artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRef {
    pub name: String,
    pub artist: String,
}

impl TrackRef {
    pub fn new(name: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
        }
    }

    /// `"<artist> - <name>"` with path separators replaced by underscores.
    pub fn file_stem(&self) -> String {
        format!(
            "{} - {}",
            sanitize_component(&self.artist),
            sanitize_component(&self.name)
        )
    }

    pub fn mp3_file_name(&self) -> String {
        format!("{}.mp3", self.file_stem())
    }

    /// yt-dlp output template next to the final file; the extension is chosen
    /// by the downloaded stream.
    pub fn download_template(&self) -> String {
        format!("{}.%(ext)s", self.file_stem())
    }

    pub fn search_query(&self, suffix: &str) -> String {
        if suffix.is_empty() {
            format!("{} {}", self.name, self.artist)
        } else {
            format!("{} {} {}", self.name, self.artist, suffix)
        }
    }

    /// Key under which a completed download is recorded in the cache.
    pub fn cache_key(&self) -> String {
        format!("{} - {}", self.artist, self.name)
    }
}

impl fmt::Display for TrackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.name)
    }
}

/// Replaces path separators so the value can be used as a single file name component.
pub fn sanitize_component(value: &str) -> String {
    value.replace(['/', '\\'], "_")
}
