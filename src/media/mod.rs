//! External media tools.
//!
//! Both tools run as child processes and block the calling thread. The
//! download orchestrator moves every call onto tokio's blocking pool so the
//! interrupt listener keeps running while a track is fetched or converted.
//!
//! - [`ytdlp`] - search a free-text query and download the best audio stream
//! - [`ffmpeg`] - convert a downloaded stream to MP3

use std::{
    fmt,
    path::{Path, PathBuf},
};

pub mod ffmpeg;
pub mod ytdlp;

#[derive(Debug)]
pub enum MediaError {
    ToolNotFound(&'static str),
    IoError(std::io::Error),
    ProcessFailed(String),
    NoResult,
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::ToolNotFound(tool) => {
                write!(f, "{} not found. Install it and add it to PATH.", tool)
            }
            MediaError::IoError(e) => write!(f, "{}", e),
            MediaError::ProcessFailed(msg) => write!(f, "{}", msg),
            MediaError::NoResult => write!(f, "no matching audio source"),
        }
    }
}

impl std::error::Error for MediaError {}

impl From<std::io::Error> for MediaError {
    fn from(err: std::io::Error) -> Self {
        MediaError::IoError(err)
    }
}

/// Resolves a search query to an audio stream and downloads it.
pub trait Extractor: Send + Sync {
    /// Downloads the best audio match for `query`.
    ///
    /// `template` is an output path whose extension placeholder `%(ext)s` is
    /// filled in by the extractor. Returns the path of the written file.
    fn download(&self, query: &str, template: &Path) -> Result<PathBuf, MediaError>;
}

/// Converts an audio file into the target format.
pub trait Transcoder: Send + Sync {
    fn convert(&self, src: &Path, dst: &Path) -> Result<(), MediaError>;
}
