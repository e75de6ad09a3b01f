use std::{fmt, io::Error, path::PathBuf};

use chrono::Utc;
use serde_json::{Map, Value, json};

use crate::types::TrackRef;

#[derive(Debug)]
pub enum CacheError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::IoError(e) => write!(f, "{}", e),
            CacheError::SerdeError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CacheError {}

impl From<Error> for CacheError {
    fn from(err: Error) -> Self {
        CacheError::IoError(err)
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::SerdeError(err)
    }
}

/// Record of completed downloads, persisted as a JSON object.
///
/// Entries written by other versions are kept untouched; new entries are keyed
/// by [`TrackRef::cache_key`].
pub struct CacheManager {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl CacheManager {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: Map::new(),
        }
    }

    /// Loads the record at `path`, or starts empty when the file does not exist.
    pub async fn load(path: PathBuf) -> Result<Self, CacheError> {
        let content = match async_fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new(path)),
            Err(e) => return Err(CacheError::IoError(e)),
        };

        let entries: Map<String, Value> = serde_json::from_str(&content)?;
        Ok(Self { path, entries })
    }

    /// Writes the record back pretty-printed with two-space indentation.
    pub async fn persist(&self) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                async_fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(&self.entries)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    pub fn record(&mut self, track: &TrackRef, file_name: &str) -> &mut Self {
        self.entries.insert(
            track.cache_key(),
            json!({
                "file": file_name,
                "downloaded_at": Utc::now().to_rfc3339(),
            }),
        );
        self
    }

    pub fn contains(&self, track: &TrackRef) -> bool {
        self.entries.contains_key(&track.cache_key())
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &Map<String, Value> {
        &self.entries
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
