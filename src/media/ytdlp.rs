use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::media::{Extractor, MediaError};

const BINARY: &str = "yt-dlp";

/// yt-dlp driven extraction using its built-in YouTube search.
pub struct YtDlp {
    binary: PathBuf,
}

impl YtDlp {
    /// Locates `yt-dlp` on `PATH`.
    pub fn locate() -> Result<Self, MediaError> {
        which::which(BINARY)
            .map(|binary| Self { binary })
            .map_err(|_| MediaError::ToolNotFound(BINARY))
    }
}

/// Builds the yt-dlp arguments for a single-result search download.
///
/// With `--quiet` the only stdout line is the final file path, printed after
/// post-processing.
pub fn download_args(query: &str, template: &Path) -> Vec<String> {
    vec![
        "-f".to_string(),
        "bestaudio/best".to_string(),
        "-o".to_string(),
        template.to_string_lossy().into_owned(),
        "--quiet".to_string(),
        "--no-warnings".to_string(),
        "--no-playlist".to_string(),
        "--no-simulate".to_string(),
        "--print".to_string(),
        "after_move:filepath".to_string(),
        format!("ytsearch1:{}", query),
    ]
}

impl Extractor for YtDlp {
    fn download(&self, query: &str, template: &Path) -> Result<PathBuf, MediaError> {
        let output = Command::new(&self.binary)
            .args(download_args(query, template))
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MediaError::ProcessFailed(format!(
                "yt-dlp failed: {}",
                stderr.trim()
            )));
        }

        let printed = String::from_utf8_lossy(&output.stdout);
        let path = printed
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .last()
            .ok_or(MediaError::NoResult)?;

        Ok(PathBuf::from(path))
    }
}
