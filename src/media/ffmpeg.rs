use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::{
    config,
    media::{MediaError, Transcoder},
};

const BINARY: &str = "ffmpeg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeOptions {
    pub bitrate: String,
    pub sample_rate: u32,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            bitrate: config::DEFAULT_BITRATE.to_string(),
            sample_rate: config::DEFAULT_SAMPLE_RATE,
        }
    }
}

/// MP3 conversion through the ffmpeg executable.
pub struct Ffmpeg {
    binary: PathBuf,
    options: TranscodeOptions,
}

impl Ffmpeg {
    /// Locates `ffmpeg` on `PATH`.
    pub fn locate(options: TranscodeOptions) -> Result<Self, MediaError> {
        which::which(BINARY)
            .map(|binary| Self { binary, options })
            .map_err(|_| MediaError::ToolNotFound(BINARY))
    }
}

/// Arguments for an audio-only libmp3lame conversion that overwrites `dst`.
pub fn convert_args(src: &Path, dst: &Path, options: &TranscodeOptions) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-i".to_string(),
        src.to_string_lossy().into_owned(),
        "-vn".to_string(),
        "-codec:a".to_string(),
        "libmp3lame".to_string(),
        "-b:a".to_string(),
        options.bitrate.clone(),
        "-ar".to_string(),
        options.sample_rate.to_string(),
        dst.to_string_lossy().into_owned(),
    ]
}

impl Transcoder for Ffmpeg {
    fn convert(&self, src: &Path, dst: &Path) -> Result<(), MediaError> {
        let status = Command::new(&self.binary)
            .args(convert_args(src, dst, &self.options))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;

        if !status.success() {
            return Err(MediaError::ProcessFailed(format!(
                "ffmpeg exited with {}",
                status
            )));
        }

        Ok(())
    }
}
